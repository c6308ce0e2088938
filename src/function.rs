use std::cell::RefCell;
use std::fmt::Debug;
use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Flow, Interpreter};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-defined function or method, paired with the environment that was
/// active when it was declared. Calling it opens a fresh child of that
/// environment (not of whatever environment happens to be current at the
/// call site) so closures keep seeing the variables they captured.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Function {
    pub fn new(name: Token, params: Vec<Token>, body: Vec<Stmt>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Produces a copy of this function whose closure additionally binds
    /// `this` to `instance`. Used when a method is looked up off an instance,
    /// so the body can refer to `this` without the interpreter having to
    /// thread a receiver through every call.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments.into_iter()).for_each(|(param, arg)| {
            environment.define(&param.lexeme, arg);
        });

        let flow = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)))?;

        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::from("this"));
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Object::from(Literal::Nil)),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The two built-ins the language ships with: a wall-clock reading and a
    /// single line of stdin.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("clock"),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: Token::from("input"),
                arity: 0,
                function: |_, _| {
                    let mut input = String::new();
                    match std::io::stdin().read_line(&mut input) {
                        Ok(0) => Ok(Object::from(Literal::Nil)),
                        Ok(_) => {
                            if input.ends_with('\n') {
                                input.pop();
                                if input.ends_with('\r') {
                                    input.pop();
                                }
                            }
                            Ok(Object::from(input))
                        }
                        Err(_) => Ok(Object::from(Literal::Nil)),
                    }
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
