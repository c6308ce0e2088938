use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::Expr;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Token, Type};

/// What a statement handed back up to its caller: either nothing in
/// particular, or a value unwinding out of a `return`. Mirrors the AST's
/// closed statement set, which has no `break`/`continue` to carry.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Return(Object),
}

/// Walks the AST directly against a resolved depth table, evaluating as it
/// goes. `output` is the only place a `Print` statement is allowed to write,
/// so embedders can capture a program's stdout without touching a real
/// stream.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records the lexical distance the resolver computed for a variable,
    /// `this`, or `super` reference.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.output, "{value}").expect("write to output sink to succeed");
                Ok(Flow::Normal)
            }
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };
                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(Flow::Normal)
            }
            Stmt::Block(data) => {
                let scope = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(scope)))
            }
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.as_bool().unwrap_or(true) {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.as_bool().unwrap_or(true) {
                    match self.execute(&data.body)? {
                        Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Function(data) => {
                let function = Function::new(
                    data.name.clone(),
                    data.params.clone(),
                    data.body.clone(),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
                Ok(Flow::Normal)
            }
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::from(Literal::Nil),
                };
                Ok(Flow::Return(value))
            }
            Stmt::Class(data) => self.execute_class(data),
        }
    }

    fn execute_class(&mut self, data: &crate::stmt::ClassData) -> Result<Flow, RuntimeError> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(v) => v.name.clone(),
                            _ => unreachable!("parser only ever produces a Variable superclass expression"),
                        };
                        return Err(RuntimeError {
                            token,
                            message: "Superclass must be a class".to_string(),
                        });
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let previous = Rc::clone(&self.environment);
        if let Some(superclass) = &superclass {
            let scope = Environment::new(Some(Rc::clone(&self.environment)));
            self.environment = Rc::new(RefCell::new(scope));
            self.environment.borrow_mut().define("super", Object::from(Rc::clone(superclass)));
        }

        let mut methods = HashMap::new();
        for method in &data.methods {
            if let Stmt::Function(function) = method {
                let is_initializer = function.name.lexeme == "init";
                let value = Function::new(
                    function.name.clone(),
                    function.params.clone(),
                    function.body.clone(),
                    Rc::clone(&self.environment),
                    is_initializer,
                );
                methods.insert(function.name.lexeme.clone(), value);
            } else {
                unreachable!("class bodies only ever contain Function statements");
            }
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));

        if data.superclass.is_some() {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(Flow::Normal)
    }

    /// Executes a block of statements in `environment`, restoring whatever
    /// environment was active beforehand even if a runtime error unwinds
    /// through this call.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Flow, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(Flow::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Flow::Normal) => continue,
                Ok(flow @ Flow::Return(_)) => {
                    result = Ok(flow);
                    break;
                }
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::from(literal.clone())),
            Expr::Grouping(data) => self.evaluate(&data.expr),
            Expr::Unary(data) => self.evaluate_unary(data),
            Expr::Binary(data) => self.evaluate_binary(data),
            Expr::Logical(data) => self.evaluate_logical(data),
            Expr::Variable(data) => self.look_up_variable(&data.name),
            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;
                match self.locals.get(&data.name) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(distance, &data.name, value.clone()),
                    None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call(data) => self.evaluate_call(data),
            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;
                match object {
                    Object::Instance(instance) => {
                        let value = instance.borrow().get(&data.name, &Object::Instance(Rc::clone(&instance)))?;
                        Ok(value)
                    }
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have properties".to_string(),
                    }),
                }
            }
            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;
                match object {
                    Object::Instance(instance) => {
                        let value = self.evaluate(&data.value)?;
                        instance.borrow_mut().set(&data.name, value.clone());
                        Ok(value)
                    }
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have fields".to_string(),
                    }),
                }
            }
            Expr::This(data) => self.look_up_variable(&data.keyword),
            Expr::Super(data) => self.evaluate_super(data),
        }
    }

    fn evaluate_unary(&mut self, data: &crate::expr::UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operand must be a number".to_string(),
            }),
            Type::Bang => Ok(Object::from(!right.as_bool().unwrap_or(true))),
            _ => unreachable!("parser only ever produces '-' or '!' as a unary operator"),
        }
    }

    fn evaluate_logical(&mut self, data: &crate::expr::LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let truthy = left.as_bool().unwrap_or(true);

        match data.operator.r#type {
            Type::Or if truthy => Ok(left),
            Type::And if !truthy => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn evaluate_binary(&mut self, data: &crate::expr::BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let operator = &data.operator;

        match operator.r#type {
            Type::Minus => (left - right).ok_or_else(|| number_operand_error(operator)),
            Type::Slash => (left / right).ok_or_else(|| number_operand_error(operator)),
            Type::Star => (left * right).ok_or_else(|| number_operand_error(operator)),
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings".to_string(),
            }),
            Type::Greater => left.partial_cmp(&right).map(|o| Object::from(o.is_gt())).ok_or_else(|| number_operand_error(operator)),
            Type::GreaterEqual => left.partial_cmp(&right).map(|o| Object::from(o.is_ge())).ok_or_else(|| number_operand_error(operator)),
            Type::Less => left.partial_cmp(&right).map(|o| Object::from(o.is_lt())).ok_or_else(|| number_operand_error(operator)),
            Type::LessEqual => left.partial_cmp(&right).map(|o| Object::from(o.is_le())).ok_or_else(|| number_operand_error(operator)),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!("parser only ever produces a binary operator in this set"),
        }
    }

    fn evaluate_call(&mut self, data: &crate::expr::CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(function) => function.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: data.paren.clone(),
                    message: "Can only call functions and classes".to_string(),
                });
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!("Expected {} arguments but got {}", arity, arguments.len()),
            });
        }

        match &callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(function) => function.call(self, arguments),
            Object::Class(class) => {
                let class = Rc::clone(class);
                let result = class.borrow().call(self, arguments);
                result
            }
            _ => unreachable!("non-callable already rejected above"),
        }
    }

    fn evaluate_super(&mut self, data: &crate::expr::SuperData) -> Result<Object, RuntimeError> {
        let distance = *self.locals.get(&data.keyword).expect("resolver to have recorded 'super' depth");

        let superclass = match self.environment.borrow().get_at(distance, &data.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("'super' always resolves to a class value"),
        };

        let this_token = Token::from("this");
        let instance = match self.environment.borrow().get_at(distance - 1, &this_token)? {
            Object::Instance(instance) => instance,
            _ => unreachable!("'this' always resolves to an instance value"),
        };

        match superclass.borrow().get_method(&data.method.lexeme) {
            Some(method) => Ok(Object::from(method.bind(Object::from(instance)))),
            None => Err(RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'", data.method.lexeme),
            }),
        }
    }

    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn number_operand_error(operator: &Token) -> RuntimeError {
    RuntimeError {
        token: operator.clone(),
        message: "Operands must be numbers".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run(source: &str) -> (String, Option<RuntimeError>) {
        let mut output = Vec::new();
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "unexpected scan errors: {scan_errors:?}");
        let (statements, parse_errors) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");

        let mut interpreter = Interpreter::new(&mut output);
        let resolve_errors = Resolver::new(&mut interpreter).resolve(&statements);
        assert!(resolve_errors.is_empty(), "unexpected resolve errors: {resolve_errors:?}");

        let result = interpreter.interpret(&statements);
        let error = result.err();
        (String::from_utf8(output).expect("output to be valid utf8"), error)
    }

    #[test]
    fn prints_arithmetic() {
        let (output, error) = run("print 1 + 2 * 3;");
        assert!(error.is_none());
        assert_eq!(output, "7\n");
    }

    #[test]
    fn string_concatenation() {
        let (output, error) = run(r#"print "foo" + "bar";"#);
        assert!(error.is_none());
        assert_eq!(output, "foobar\n");
    }

    #[test]
    fn adding_number_and_string_is_a_runtime_error() {
        let (_, error) = run(r#"print 1 + "a";"#);
        assert_eq!(error.unwrap().message, "Operands must be two numbers or two strings");
    }

    #[test]
    fn variable_scoping_and_shadowing() {
        let (output, error) = run(r#"
            var a = "outer";
            {
                var a = "inner";
                print a;
            }
            print a;
        "#);
        assert!(error.is_none());
        assert_eq!(output, "inner\nouter\n");
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let (output, error) = run(r#"
            fun makeCounter() {
                var count = 0;
                fun increment() {
                    count = count + 1;
                    print count;
                }
                return increment;
            }
            var counter = makeCounter();
            counter();
            counter();
        "#);
        assert!(error.is_none());
        assert_eq!(output, "1\n2\n");
    }

    #[test]
    fn classes_fields_and_methods() {
        let (output, error) = run(r#"
            class Greeter {
                init(name) {
                    this.name = name;
                }
                greet() {
                    print "hello " + this.name;
                }
            }
            var greeter = Greeter("world");
            greeter.greet();
        "#);
        assert!(error.is_none());
        assert_eq!(output, "hello world\n");
    }

    #[test]
    fn inheritance_and_super() {
        let (output, error) = run(r#"
            class Animal {
                speak() {
                    print "...";
                }
            }
            class Dog < Animal {
                speak() {
                    super.speak();
                    print "woof";
                }
            }
            Dog().speak();
        "#);
        assert!(error.is_none());
        assert_eq!(output, "...\nwoof\n");
    }

    #[test]
    fn calling_a_non_callable_is_a_runtime_error() {
        let (_, error) = run("var a = 1; a();");
        assert_eq!(error.unwrap().message, "Can only call functions and classes");
    }

    #[test]
    fn wrong_arity_is_a_runtime_error() {
        let (_, error) = run("fun f(a) { return a; } f(1, 2);");
        assert_eq!(error.unwrap().message, "Expected 1 arguments but got 2");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let (_, error) = run("print nope;");
        assert_eq!(error.unwrap().message, "Undefined variable 'nope'");
    }
}
