use super::chunk::{Chunk, OpCode};
use super::value::Value;
use crate::error::CompileError;
use crate::expr::Expr;
use crate::literal::Literal;
use crate::stmt::{IfData, Stmt};
use crate::token::Type;

struct Local {
    name: String,
    depth: usize,
}

/// Compiles the AST into a single top-level [`Chunk`]. Only the subset of
/// the language that fits a flat, function-less chunk compiles today: a
/// block-structured sequence of `var`/`if`/`print`/expression statements
/// over global and local variables. Anything that would need call frames
/// (functions, `return`), late-bound receivers (classes, `this`, `super`,
/// properties) or unstructured control flow (`while`) is rejected with a
/// [`CompileError`] instead of silently compiling to something wrong.
pub struct Compiler {
    chunk: Chunk,
    locals: Vec<Local>,
    scope_depth: usize,
    current_line: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            chunk: Chunk::new(),
            locals: Vec::new(),
            scope_depth: 0,
            current_line: 1,
        }
    }

    pub fn compile(mut self, statements: &[Stmt]) -> Result<Chunk, CompileError> {
        for statement in statements {
            self.compile_stmt(statement)?;
        }
        Ok(self.chunk)
    }

    fn begin_scope(&mut self) {
        self.scope_depth += 1;
    }

    fn end_scope(&mut self, line: usize) {
        self.scope_depth -= 1;
        while let Some(local) = self.locals.last() {
            if local.depth > self.scope_depth {
                self.locals.pop();
                self.chunk.add_instruction(OpCode::Pop, [0, 0], line);
            } else {
                break;
            }
        }
    }

    fn resolve_local(&self, name: &str) -> Option<usize> {
        self.locals.iter().rposition(|local| local.name == name)
    }

    fn stmt_line(&mut self, stmt: &Stmt) -> usize {
        let line = match stmt {
            Stmt::Block(_) => None,
            Stmt::Class(data) => Some(data.name.location.line),
            Stmt::Expression(data) => expr_line(&data.expr),
            Stmt::Function(data) => Some(data.name.location.line),
            Stmt::If(data) => expr_line(&data.condition),
            Stmt::Print(data) => expr_line(&data.expr),
            Stmt::Return(data) => Some(data.keyword.location.line),
            Stmt::Var(data) => Some(data.name.location.line),
            Stmt::While(data) => expr_line(&data.condition),
        };
        if let Some(line) = line {
            self.current_line = line;
        }
        self.current_line
    }

    fn expr_line(&mut self, expr: &Expr) -> usize {
        if let Some(line) = expr_line(expr) {
            self.current_line = line;
        }
        self.current_line
    }

    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<(), CompileError> {
        let line = self.stmt_line(stmt);

        match stmt {
            Stmt::Expression(data) => {
                self.compile_expr(&data.expr)?;
                self.chunk.add_instruction(OpCode::Pop, [0, 0], line);
                Ok(())
            }
            Stmt::Print(data) => {
                self.compile_expr(&data.expr)?;
                self.chunk.add_instruction(OpCode::Print, [0, 0], line);
                Ok(())
            }
            Stmt::Var(data) => self.compile_var(data, line),
            Stmt::Block(data) => {
                self.begin_scope();
                for statement in &data.statements {
                    self.compile_stmt(statement)?;
                }
                self.end_scope(line);
                Ok(())
            }
            Stmt::If(data) => self.compile_if(data),
            Stmt::Function(data) => Err(CompileError {
                line,
                message: format!("function declarations are not yet implemented by the bytecode compiler (got '{}')", data.name.lexeme),
            }),
            Stmt::Return(_) => Err(CompileError {
                line,
                message: "'return' is not yet implemented by the bytecode compiler".to_string(),
            }),
            Stmt::Class(data) => Err(CompileError {
                line,
                message: format!("class declarations are not yet implemented by the bytecode compiler (got '{}')", data.name.lexeme),
            }),
            Stmt::While(_) => Err(CompileError {
                line,
                message: "'while' is not yet implemented by the bytecode compiler".to_string(),
            }),
        }
    }

    fn compile_var(&mut self, data: &crate::stmt::VarData, line: usize) -> Result<(), CompileError> {
        if self.scope_depth > 0 {
            match &data.initializer {
                Some(initializer) => self.compile_expr(initializer)?,
                None => {
                    let slot = self.chunk.add_constant(Value::Nil);
                    self.chunk.add_instruction(OpCode::Constant, [slot, 0], line);
                }
            }
            self.locals.push(Local { name: data.name.lexeme.clone(), depth: self.scope_depth });
            return Ok(());
        }

        let name_slot = self.chunk.add_constant(Value::String(data.name.lexeme.clone()));
        self.chunk.add_instruction(OpCode::Constant, [name_slot, 0], line);
        self.chunk.add_instruction(OpCode::DeclareGlobal, [0, 0], line);

        if let Some(initializer) = &data.initializer {
            self.compile_expr(initializer)?;
            let name_slot = self.chunk.add_constant(Value::String(data.name.lexeme.clone()));
            self.chunk.add_instruction(OpCode::Constant, [name_slot, 0], line);
            self.chunk.add_instruction(OpCode::Assign, [0, 0], line);
            self.chunk.add_instruction(OpCode::Pop, [0, 0], line);
        }

        Ok(())
    }

    fn compile_if(&mut self, data: &IfData) -> Result<(), CompileError> {
        let line = self.expr_line(&data.condition);
        self.compile_expr(&data.condition)?;

        let truthy_slot = self.chunk.add_constant(Value::Number(0.0));
        let falsey_slot = self.chunk.add_constant(Value::Number(0.0));
        self.chunk.add_instruction(OpCode::ConditionalJump, [truthy_slot, falsey_slot], line);

        let then_start = self.chunk.instructions.len();
        self.compile_stmt(&data.then_branch)?;
        let then_len = self.chunk.instructions.len() - then_start;

        let jump_slot = self.chunk.add_constant(Value::Number(0.0));
        self.chunk.add_instruction(OpCode::Jump, [jump_slot, 0], line);

        // The truthy branch falls straight through to the instruction right
        // after the CONDITIONAL_JUMP; the falsey branch skips the
        // then-branch and the trailing JUMP to land on the else-branch.
        self.chunk.constants[falsey_slot] = Value::Number((then_len + 1) as f64);

        let else_start = self.chunk.instructions.len();
        if let Some(else_branch) = &data.else_branch {
            self.compile_stmt(else_branch)?;
        }
        let else_len = self.chunk.instructions.len() - else_start;
        self.chunk.constants[jump_slot] = Value::Number(else_len as f64);

        Ok(())
    }

    fn compile_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        let line = self.expr_line(expr);

        match expr {
            Expr::Literal(literal) => {
                let value = match literal {
                    Literal::Number(n) => Value::Number(*n),
                    Literal::String(s) => Value::String(s.clone()),
                    Literal::Bool(b) => Value::Bool(*b),
                    Literal::Nil => Value::Nil,
                };
                let slot = self.chunk.add_constant(value);
                self.chunk.add_instruction(OpCode::Constant, [slot, 0], line);
                Ok(())
            }
            Expr::Grouping(data) => self.compile_expr(&data.expr),
            Expr::Unary(data) => {
                self.compile_expr(&data.expr)?;
                self.chunk.add_instruction(OpCode::Negate, [0, 0], line);
                Ok(())
            }
            Expr::Binary(data) => {
                self.compile_expr(&data.left)?;
                self.compile_expr(&data.right)?;
                let opcode = binary_opcode(data.operator.r#type).ok_or_else(|| CompileError {
                    line,
                    message: format!("unsupported binary operator '{}'", data.operator.lexeme),
                })?;
                self.chunk.add_instruction(opcode, [0, 0], line);
                Ok(())
            }
            Expr::Logical(data) => {
                self.compile_expr(&data.left)?;
                self.compile_expr(&data.right)?;
                let opcode = match data.operator.r#type {
                    Type::And => OpCode::And,
                    Type::Or => OpCode::Or,
                    _ => unreachable!("parser only ever produces 'and'/'or' as a logical operator"),
                };
                self.chunk.add_instruction(opcode, [0, 0], line);
                Ok(())
            }
            Expr::Variable(data) => {
                match self.resolve_local(&data.name.lexeme) {
                    Some(slot) => {
                        self.chunk.add_instruction(OpCode::LocalLookup, [slot, 0], line);
                    }
                    None => {
                        let name_slot = self.chunk.add_constant(Value::String(data.name.lexeme.clone()));
                        self.chunk.add_instruction(OpCode::Constant, [name_slot, 0], line);
                        self.chunk.add_instruction(OpCode::GlobalLookup, [0, 0], line);
                    }
                }
                Ok(())
            }
            Expr::Assign(data) => {
                self.compile_expr(&data.value)?;
                match self.resolve_local(&data.name.lexeme) {
                    Some(slot) => {
                        self.chunk.add_instruction(OpCode::LocalAssign, [slot, 0], line);
                    }
                    None => {
                        let name_slot = self.chunk.add_constant(Value::String(data.name.lexeme.clone()));
                        self.chunk.add_instruction(OpCode::Constant, [name_slot, 0], line);
                        self.chunk.add_instruction(OpCode::Assign, [0, 0], line);
                    }
                }
                Ok(())
            }
            Expr::Call(_) => Err(CompileError { line, message: "function calls are not yet implemented by the bytecode compiler".to_string() }),
            Expr::Get(_) => Err(CompileError { line, message: "property access is not yet implemented by the bytecode compiler".to_string() }),
            Expr::Set(_) => Err(CompileError { line, message: "property assignment is not yet implemented by the bytecode compiler".to_string() }),
            Expr::This(_) => Err(CompileError { line, message: "'this' is not yet implemented by the bytecode compiler".to_string() }),
            Expr::Super(_) => Err(CompileError { line, message: "'super' is not yet implemented by the bytecode compiler".to_string() }),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn binary_opcode(r#type: Type) -> Option<OpCode> {
    match r#type {
        Type::Plus => Some(OpCode::Add),
        Type::Minus => Some(OpCode::Subtract),
        Type::Star => Some(OpCode::Multiply),
        Type::Slash => Some(OpCode::Divide),
        Type::Less => Some(OpCode::Less),
        Type::LessEqual => Some(OpCode::LessEqual),
        Type::Greater => Some(OpCode::Greater),
        Type::GreaterEqual => Some(OpCode::GreaterEqual),
        Type::EqualEqual => Some(OpCode::EqualEqual),
        Type::BangEqual => Some(OpCode::NotEqual),
        _ => None,
    }
}

fn expr_line(expr: &Expr) -> Option<usize> {
    match expr {
        Expr::Literal(_) => None,
        Expr::Grouping(data) => expr_line(&data.expr),
        Expr::Unary(data) => Some(data.operator.location.line),
        Expr::Binary(data) => Some(data.operator.location.line),
        Expr::Logical(data) => Some(data.operator.location.line),
        Expr::Variable(data) => Some(data.name.location.line),
        Expr::Assign(data) => Some(data.name.location.line),
        Expr::Call(data) => Some(data.paren.location.line),
        Expr::Get(data) => Some(data.name.location.line),
        Expr::Set(data) => Some(data.name.location.line),
        Expr::This(data) => Some(data.keyword.location.line),
        Expr::Super(data) => Some(data.keyword.location.line),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn compile(source: &str) -> Result<Chunk, CompileError> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty());
        let (statements, errors) = Parser::new(tokens).parse();
        assert!(errors.is_empty());
        Compiler::new().compile(&statements)
    }

    #[test]
    fn compiles_a_global_declaration_and_print() {
        let chunk = compile("var a = 1; print a;").expect("compilation to succeed");
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::DeclareGlobal));
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::GlobalLookup));
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::Print));
    }

    #[test]
    fn compiles_locals_without_a_global_declaration() {
        let chunk = compile("{ var a = 1; print a; }").expect("compilation to succeed");
        assert!(!chunk.instructions.iter().any(|i| i.opcode == OpCode::DeclareGlobal));
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::LocalLookup));
    }

    #[test]
    fn compiles_if_else_with_patched_jumps() {
        let chunk = compile("if (true) { print 1; } else { print 2; }").expect("compilation to succeed");
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::ConditionalJump));
        assert!(chunk.instructions.iter().any(|i| i.opcode == OpCode::Jump));
    }

    #[test]
    fn rejects_while_as_not_yet_implemented() {
        let result = compile("while (true) { print 1; }");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_function_declarations_as_not_yet_implemented() {
        let result = compile("fun f() { return 1; }");
        assert!(result.is_err());
    }
}
