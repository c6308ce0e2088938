use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

#[derive(Clone)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<RefCell<Class>>>, methods: HashMap<String, Function>) -> Self {
        Class { name, superclass, methods }
    }

    /// Looks up a method on this class, falling back to the superclass chain.
    pub fn get_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass.as_ref().and_then(|superclass| superclass.borrow().get_method(name))
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Callable for Class {
    fn arity(&self) -> usize {
        self.get_method("init").map_or(0, |initializer| initializer.arity())
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let class = Rc::new(RefCell::new(self.clone()));
        let instance = Rc::new(RefCell::new(Instance::from(&class)));
        let instance_object = Object::from(Rc::clone(&instance));

        if let Some(initializer) = self.get_method("init") {
            let bound = initializer.bind(instance_object.clone());
            bound.call(interpreter, arguments)?;
        }

        Ok(instance_object)
    }
}

#[derive(Clone)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    pub fn get(&self, name: &Token, instance: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            Ok(field.clone())
        } else if let Some(method) = self.class.borrow().get_method(&name.lexeme) {
            Ok(Object::from(method.bind(instance.clone())))
        } else {
            Err(RuntimeError {
                token: name.clone(),
                message: format!("Undefined property '{}'", name.lexeme),
            })
        }
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl From<&Rc<RefCell<Class>>> for Instance {
    fn from(value: &Rc<RefCell<Class>>) -> Self {
        Instance { class: Rc::clone(value), fields: HashMap::new() }
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.borrow().name)
    }
}
