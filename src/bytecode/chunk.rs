use super::value::Value;

/// The finalized opcode set. Every instruction carries at most two small
/// operands, each an index into either the constant pool or the local-slot
/// table, never a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Return,
    Constant,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
    Print,
    Or,
    And,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    DeclareGlobal,
    Assign,
    GlobalLookup,
    LocalLookup,
    LocalAssign,
    Pop,
    ConditionalJump,
    Jump,
}

/// A single bytecode instruction: an opcode, up to two operand indices, and
/// the source line it was compiled from (carried so the VM can report a
/// runtime error against the right line without a separate line table).
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: OpCode,
    pub operands: [usize; 2],
    pub line: usize,
}

impl Instruction {
    pub fn new(opcode: OpCode, operands: [usize; 2], line: usize) -> Self {
        Instruction { opcode, operands, line }
    }
}

/// A compiled program: its instructions, its constant pool (which also
/// holds back-patched jump displacements), laid out flat with no separate
/// function bodies.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub instructions: Vec<Instruction>,
    pub constants: Vec<Value>,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk::default()
    }

    /// Appends a constant and returns its index for use as an instruction
    /// operand.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    pub fn add_instruction(&mut self, opcode: OpCode, operands: [usize; 2], line: usize) -> usize {
        self.instructions.push(Instruction::new(opcode, operands, line));
        self.instructions.len() - 1
    }

    /// Renders a human-readable disassembly, one instruction per line. Used
    /// by tests and by anyone debugging the compiler's output; never
    /// consulted by the VM itself.
    pub fn disassemble(&self) -> String {
        let mut output = String::new();
        for (offset, instruction) in self.instructions.iter().enumerate() {
            output.push_str(&format!("{offset:04} line {} {:?}", instruction.line, instruction.opcode));
            match instruction.opcode {
                OpCode::Constant | OpCode::ConditionalJump | OpCode::Jump => {
                    output.push_str(&format!(" {:?}", instruction.operands));
                }
                OpCode::LocalLookup | OpCode::LocalAssign => {
                    output.push_str(&format!(" slot={}", instruction.operands[0]));
                }
                _ => {}
            }
            output.push('\n');
        }
        output
    }
}
