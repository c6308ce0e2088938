use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::stmt::Stmt;
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

/// Single pre-execution pass that annotates every local variable reference
/// with its lexical depth, so the interpreter never has to search an
/// environment chain at runtime. Also enforces the handful of static checks
/// that are cheap to catch before a program ever runs.
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    errors: Vec<ResolveError>,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            errors: vec![],
        }
    }

    /// Resolves every statement, collecting one diagnostic per static error
    /// along the way rather than aborting at the first one.
    pub fn resolve(&mut self, statements: &[Stmt]) -> Vec<ResolveError> {
        self.resolve_all(statements);
        mem::take(&mut self.errors)
    }

    fn resolve_all(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_all(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        if self.scopes.last().expect("stack to be not empty").contains_key(&name.lexeme) {
            self.errors.push(ResolveError {
                token: name.clone(),
                message: format!("A variable is already defined with name '{}' in this scope", name.lexeme),
            });
        }
        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(name.lexeme.to_owned(), true);
    }

    fn resolve_local(&mut self, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(name, i);
                return;
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if let Some(false) = scope.get(&data.name.lexeme) {
                        self.errors.push(ResolveError {
                            token: data.name.to_owned(),
                            message: "Cannot read local variable in its own initializer".to_string(),
                        });
                    }
                }

                self.resolve_local(&data.name);
            }
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(&data.name);
            }
            Expr::Literal(_) => {}
            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Unary(data) => self.resolve_expr(&data.expr),
            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Grouping(data) => self.resolve_expr(&data.expr),
            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get(data) => self.resolve_expr(&data.object),
            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            }
            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    self.errors.push(ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'this' outside of a class".to_string(),
                    });
                    return;
                }

                self.resolve_local(&data.keyword);
            }
            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => (),
                    ClassType::None => self.errors.push(ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' outside of a class".to_string(),
                    }),
                    _ => self.errors.push(ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' in a class with no superclass".to_string(),
                    }),
                }

                self.resolve_local(&data.keyword);
            }
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve_all(&data.statements);
                self.end_scope();
            }
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            }
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(&data.params, &data.body, FunctionType::Function);
            }
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    self.errors.push(ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot return from top-level code".to_string(),
                    });
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        self.errors.push(ResolveError {
                            token: data.keyword.clone(),
                            message: "Cannot return a value from an initializer".to_string(),
                        });
                        return;
                    }

                    self.resolve_expr(value);
                }
            }
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            }
            Stmt::Class(data) => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(&data.name);
                self.define(&data.name);

                if let Some(superclass) = &data.superclass {
                    if let Expr::Variable(variable) = superclass {
                        if data.name.lexeme == variable.name.lexeme {
                            self.errors.push(ResolveError {
                                token: variable.name.clone(),
                                message: "A class cannot inherit from itself".to_string(),
                            });
                        }
                    } else {
                        unreachable!("parser only ever produces a Variable superclass expression");
                    }

                    self.current_class = ClassType::Subclass;

                    self.resolve_expr(superclass);

                    self.begin_scope();
                    self.scopes
                        .last_mut()
                        .expect("stack to be not empty")
                        .insert("super".to_string(), true);
                }

                self.begin_scope();
                self.scopes
                    .last_mut()
                    .expect("stack to be not empty")
                    .insert("this".to_string(), true);

                for method in &data.methods {
                    if let Stmt::Function(function) = method {
                        let declaration = if function.name.lexeme == "init" {
                            FunctionType::Initializer
                        } else {
                            FunctionType::Method
                        };
                        self.resolve_function(&function.params, &function.body, declaration);
                    } else {
                        unreachable!("class bodies only ever contain Function statements");
                    }
                }

                self.end_scope();

                if data.superclass.is_some() {
                    self.end_scope();
                }

                self.current_class = enclosing_class;
            }
        }
    }
}
