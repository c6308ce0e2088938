use crate::token::{Location, Token, Type};

/// Formats and stores state for the diagnostics every pipeline stage can
/// produce. The core never writes directly to a stream: it hands a
/// formatted line to whatever sink the caller supplied, per stage, and
/// tracks whether *any* stage reported trouble so the caller can decide
/// whether to run the next stage and what exit code to use.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error || self.had_runtime_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    pub fn report_scan(&mut self, error: &ScanError) -> String {
        self.had_error = true;
        error.to_string()
    }

    pub fn report_parse(&mut self, error: &ParseError) -> String {
        self.had_error = true;
        error.to_string()
    }

    pub fn report_resolve(&mut self, error: &ResolveError) -> String {
        self.had_error = true;
        error.to_string()
    }

    pub fn report_runtime(&mut self, error: &RuntimeError) -> String {
        self.had_runtime_error = true;
        error.to_string()
    }

    pub fn report_compile(&mut self, error: &CompileError) -> String {
        self.had_error = true;
        error.to_string()
    }

    pub fn report_vm(&mut self, error: &VmError) -> String {
        self.had_runtime_error = true;
        error.to_string()
    }
}

/// An error produced while scanning source text into tokens.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] Error: {}", self.location.line, self.message)
    }
}

/// An error produced while parsing tokens into an AST.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.token.r#type == Type::EOF {
            write!(f, "[line {}] Error at end: {}", self.token.location.line, self.message)
        } else {
            write!(f, "[line {}] Error at '{}': {}", self.token.location.line, self.token.lexeme, self.message)
        }
    }
}

/// A static error produced by the resolver's pre-execution pass.
#[derive(Debug, Clone)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}]: Resolve error: {}", self.token.location.line, self.message)
    }
}

/// An error produced while executing a resolved program.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}]: {}", self.token.location.line, self.message)
    }
}

/// An error produced while compiling an AST into a chunk. Most of these are
/// "not yet implemented" for AST shapes the bytecode backend does not
/// support yet, not bugs in a well-formed program.
#[derive(Debug, Clone)]
pub struct CompileError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}]: Compile error: {}", self.line, self.message)
    }
}

/// A fatal error raised by the bytecode VM: either a genuine Lox runtime
/// error (wrong operand type, undefined global, ...) or an internal
/// inconsistency (stack underflow, unknown opcode) that should never occur
/// for a chunk produced by this compiler.
#[derive(Debug, Clone)]
pub struct VmError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}]: {}", self.line, self.message)
    }
}
