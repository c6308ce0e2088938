use super::chunk::{Chunk, OpCode};
use super::hashmap::LinearProbingHashMap;
use super::value::Value;
use crate::error::VmError;

/// A stack-based interpreter for a compiled [`Chunk`]. Holds no reference to
/// the AST or the tree-walking [`crate::interpreter::Interpreter`]; the two
/// backends are run entirely independently.
pub struct VM {
    stack: Vec<Value>,
    globals: LinearProbingHashMap,
}

impl VM {
    pub fn new() -> Self {
        VM { stack: Vec::new(), globals: LinearProbingHashMap::new() }
    }

    /// Executes every instruction in `chunk` from the start, printing
    /// `print` statement output to `output`. Running off the end of the
    /// instruction stream is normal termination, not an error.
    pub fn run(&mut self, chunk: &Chunk, output: &mut dyn std::io::Write) -> Result<(), VmError> {
        let mut ip: usize = 0;

        while ip < chunk.instructions.len() {
            let instruction = &chunk.instructions[ip];
            let line = instruction.line;

            match instruction.opcode {
                OpCode::Return => break,
                OpCode::Constant => {
                    let value = chunk.constants[instruction.operands[0]].clone();
                    self.stack.push(value);
                }
                OpCode::Negate => {
                    let value = self.pop(line)?;
                    let result = match value {
                        Value::Number(n) => Value::Number(-n),
                        other => Value::Bool(!other.is_truthy()),
                    };
                    self.stack.push(result);
                }
                OpCode::Add => {
                    let (b, a) = self.pop_pair(line)?;
                    let result = match (a, b) {
                        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
                        (Value::String(a), Value::String(b)) => Value::String(a + &b),
                        _ => return Err(vm_error(line, "Operands must be two numbers or two strings")),
                    };
                    self.stack.push(result);
                }
                OpCode::Subtract => self.binary_number_op(line, |a, b| Value::Number(a - b))?,
                OpCode::Multiply => self.binary_number_op(line, |a, b| Value::Number(a * b))?,
                OpCode::Divide => self.binary_number_op(line, |a, b| Value::Number(a / b))?,
                OpCode::Less => self.binary_number_op(line, |a, b| Value::Bool(a < b))?,
                OpCode::Greater => self.binary_number_op(line, |a, b| Value::Bool(a > b))?,
                OpCode::LessEqual => self.binary_number_op(line, |a, b| Value::Bool(a <= b))?,
                OpCode::GreaterEqual => self.binary_number_op(line, |a, b| Value::Bool(a >= b))?,
                OpCode::EqualEqual => {
                    let (b, a) = self.pop_pair(line)?;
                    self.stack.push(Value::Bool(values_equal(&a, &b)));
                }
                OpCode::NotEqual => {
                    let (b, a) = self.pop_pair(line)?;
                    self.stack.push(Value::Bool(!values_equal(&a, &b)));
                }
                OpCode::Or => {
                    let (b, a) = self.pop_pair(line)?;
                    self.stack.push(Value::Bool(a.is_truthy() || b.is_truthy()));
                }
                OpCode::And => {
                    let (b, a) = self.pop_pair(line)?;
                    self.stack.push(Value::Bool(a.is_truthy() && b.is_truthy()));
                }
                OpCode::Print => {
                    let value = self.pop(line)?;
                    writeln!(output, "{value}").map_err(|e| vm_error(line, &format!("write error: {e}")))?;
                }
                OpCode::DeclareGlobal => {
                    let name = self.pop_name(line)?;
                    self.globals.insert(&name, Value::Nil);
                }
                OpCode::Assign => {
                    let name = self.pop_name(line)?;
                    let value = self.peek(line)?.clone();
                    if !self.globals.contains_key(&name) {
                        return Err(vm_error(line, &format!("Undefined variable '{name}'")));
                    }
                    self.globals.insert(&name, value);
                }
                OpCode::GlobalLookup => {
                    let name = self.pop_name(line)?;
                    let value = self
                        .globals
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| vm_error(line, &format!("Undefined variable '{name}'")))?;
                    self.stack.push(value);
                }
                OpCode::LocalLookup => {
                    let slot = instruction.operands[0];
                    let value = self
                        .stack
                        .get(slot)
                        .cloned()
                        .ok_or_else(|| vm_error(line, "Local slot out of range"))?;
                    self.stack.push(value);
                }
                OpCode::LocalAssign => {
                    let slot = instruction.operands[0];
                    let value = self.peek(line)?.clone();
                    if slot >= self.stack.len() {
                        return Err(vm_error(line, "Local slot out of range"));
                    }
                    self.stack[slot] = value;
                }
                OpCode::Pop => {
                    self.pop(line)?;
                }
                OpCode::ConditionalJump => {
                    let condition = self.pop(line)?;
                    let displacement = if condition.is_truthy() {
                        displacement_of(chunk, instruction.operands[0])
                    } else {
                        displacement_of(chunk, instruction.operands[1])
                    };
                    ip = (ip as isize + 1 + displacement) as usize;
                    continue;
                }
                OpCode::Jump => {
                    let displacement = displacement_of(chunk, instruction.operands[0]);
                    ip = (ip as isize + 1 + displacement) as usize;
                    continue;
                }
            }

            ip += 1;
        }

        Ok(())
    }

    fn binary_number_op(&mut self, line: usize, op: impl Fn(f64, f64) -> Value) -> Result<(), VmError> {
        let (b, a) = self.pop_pair(line)?;
        match (a, b) {
            (Value::Number(a), Value::Number(b)) => {
                self.stack.push(op(a, b));
                Ok(())
            }
            _ => Err(vm_error(line, "Operands must be numbers")),
        }
    }

    fn pop(&mut self, line: usize) -> Result<Value, VmError> {
        self.stack.pop().ok_or_else(|| vm_error(line, "Stack underflow"))
    }

    fn pop_pair(&mut self, line: usize) -> Result<(Value, Value), VmError> {
        let b = self.pop(line)?;
        let a = self.pop(line)?;
        Ok((b, a))
    }

    fn peek(&self, line: usize) -> Result<&Value, VmError> {
        self.stack.last().ok_or_else(|| vm_error(line, "Stack underflow"))
    }

    fn pop_name(&mut self, line: usize) -> Result<String, VmError> {
        match self.pop(line)? {
            Value::String(name) => Ok(name),
            _ => Err(vm_error(line, "Expected a variable name")),
        }
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Nil, Value::Nil) => true,
        _ => false,
    }
}

fn displacement_of(chunk: &Chunk, slot: usize) -> isize {
    match chunk.constants[slot] {
        Value::Number(n) => n as isize,
        _ => 0,
    }
}

fn vm_error(line: usize, message: &str) -> VmError {
    VmError { line, message: message.to_string() }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bytecode::Compiler;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn run(source: &str) -> String {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty());
        let (statements, parse_errors) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty());
        let chunk = Compiler::new().compile(&statements).expect("compilation to succeed");

        let mut output = Vec::new();
        VM::new().run(&chunk, &mut output).expect("VM run to succeed");
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn evaluates_arithmetic_and_prints() {
        assert_eq!(run("print 1 + 2 * 3;"), "7\n");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run("print \"a\" + \"b\";"), "ab\n");
    }

    #[test]
    fn global_variable_round_trip() {
        assert_eq!(run("var a = 1; a = a + 1; print a;"), "2\n");
    }

    #[test]
    fn local_variable_round_trip() {
        assert_eq!(run("{ var a = 1; a = a + 1; print a; }"), "2\n");
    }

    #[test]
    fn if_else_takes_the_truthy_branch() {
        assert_eq!(run("if (1 < 2) { print \"yes\"; } else { print \"no\"; }"), "yes\n");
    }

    #[test]
    fn if_else_takes_the_falsey_branch() {
        assert_eq!(run("if (1 > 2) { print \"yes\"; } else { print \"no\"; }"), "no\n");
    }

    #[test]
    fn if_without_else_skips_cleanly() {
        assert_eq!(run("if (false) { print \"yes\"; } print \"after\";"), "after\n");
    }

    #[test]
    fn and_or_do_not_short_circuit() {
        // Documented divergence from the tree-walking evaluator: both
        // operands are always evaluated.
        assert_eq!(run("print true or (1/1 == 1); print false and (1/1 == 1);"), "true\nfalse\n");
    }

    #[test]
    fn undefined_global_is_a_runtime_error() {
        let (tokens, _) = Scanner::new("print a;").scan_tokens();
        let (statements, _) = Parser::new(tokens).parse();
        let chunk = Compiler::new().compile(&statements).unwrap();
        let mut output = Vec::new();
        assert!(VM::new().run(&chunk, &mut output).is_err());
    }
}
