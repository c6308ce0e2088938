use crate::expr::Expr;
use crate::stmt::Stmt;

/// Renders an AST back into a parenthesized, Lisp-like form. Used for
/// debugging the parser; not part of the language's observable behavior.
pub struct ASTPrinter;

impl ASTPrinter {
    pub fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.to_string(),
            Expr::Logical(data) => {
                self.parenthesize(&data.operator.lexeme, &[&data.left, &data.right])
            }
            Expr::Unary(data) => self.parenthesize(&data.operator.lexeme, &[&data.expr]),
            Expr::Binary(data) => {
                self.parenthesize(&data.operator.lexeme, &[&data.left, &data.right])
            }
            Expr::Grouping(data) => self.parenthesize("group", &[&data.expr]),
            Expr::Variable(data) => data.name.lexeme.clone(),
            Expr::Assign(data) => {
                self.parenthesize(&format!("= {}", data.name.lexeme), &[&data.value])
            }
            Expr::Call(data) => {
                let mut string = self.print_expr(&data.callee);
                string += "(";
                let args: Vec<String> = data.arguments.iter().map(|a| self.print_expr(a)).collect();
                string += &args.join(" ");
                string += ")";
                string
            }
            Expr::Get(data) => format!("(. {} {})", self.print_expr(&data.object), data.name.lexeme),
            Expr::Set(data) => format!(
                "(= (. {} {}) {})",
                self.print_expr(&data.object),
                data.name.lexeme,
                self.print_expr(&data.value)
            ),
            Expr::This(_) => "this".to_string(),
            Expr::Super(data) => format!("(super {})", data.method.lexeme),
        }
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut string = String::new();
        string += "(";
        string += name;
        for expr in exprs {
            string += " ";
            string += &self.print_expr(expr);
        }
        string += ")";
        string
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(data) => self.parenthesize("expr", &[&data.expr]),
            Stmt::Print(data) => self.parenthesize("print", &[&data.expr]),
            Stmt::Var(data) => {
                let mut string = format!("(var {}", data.name.lexeme);
                if let Some(initializer) = &data.initializer {
                    string += " = ";
                    string += &self.print_expr(initializer);
                }
                string += ")";
                string
            }
            Stmt::Block(data) => {
                let mut string = "{".to_string();
                for stmt in &data.statements {
                    string += " ";
                    string += &self.print_stmt(stmt);
                }
                string += " }";
                string
            }
            Stmt::If(data) => {
                let mut string = format!(
                    "(if {} {}",
                    self.print_expr(&data.condition),
                    self.print_stmt(&data.then_branch)
                );
                if let Some(else_branch) = &data.else_branch {
                    string += " else ";
                    string += &self.print_stmt(else_branch);
                }
                string += ")";
                string
            }
            Stmt::While(data) => format!(
                "(while {} {})",
                self.print_expr(&data.condition),
                self.print_stmt(&data.body)
            ),
            Stmt::Function(data) => {
                let params: Vec<String> = data.params.iter().map(|p| p.lexeme.clone()).collect();
                let body: Vec<String> = data.body.iter().map(|s| self.print_stmt(s)).collect();
                format!("(fun {}({}) {{ {} }})", data.name.lexeme, params.join(" "), body.join(" "))
            }
            Stmt::Return(data) => match &data.value {
                Some(value) => format!("(return {})", self.print_expr(value)),
                None => "(return)".to_string(),
            },
            Stmt::Class(data) => {
                let methods: Vec<String> = data.methods.iter().map(|m| self.print_stmt(m)).collect();
                format!("(class {} {{ {} }})", data.name.lexeme, methods.join(" "))
            }
        }
    }
}
