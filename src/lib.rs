#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scanning never aborts: the scanner keeps going after a bad character or literal, so the user can
//! see every scan error in one pass instead of one-at-a-time.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically an
//! [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of code
//! that do not produce a value but instead perform some action. These actions modify the state of the
//! program and thus, are called side-effects. For example, a variable decleration or an if clause
//! would be classified as statements.
//!
//! For example, the string `print 1 + 2;` would be converted into the following AST:
//! ```text
//! PrintStatement {
//!     BinaryExpression {
//!         left: Number(1),
//!         operator: Plus,
//!         right: Number(2),
//!     }
//! }
//! ```
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. For example, the
//! following expression is invalid because it is missing the right-hand operand:
//! ```text
//! 1 !=
//! ```
//! Much like the scanner, the parser recovers from a malformed statement using panic-mode
//! synchronization and keeps parsing, so the user can fix several syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexiacl scoping. The resolver is implemented in the
//! [`resolver`](resolver) module as a tree-walk interpreter. The resolver is run after the parser
//! because it requires the AST to be fully constructed. The resolver reports errors as a
//! [`ResolveError`](error::ResolveError). These errors are syntactically valid but semantically invalid.
//! and therefore, cannot be caught by the scanner or the parser. For example, the following expression
//! is valid a valid Rocks syntax but it is semantically invalid because the variable `a` is defined
//! twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the AST and produce
//! a result. The interpreter reports errors as a [`RuntimeError`](error::RuntimeError). While the
//! scanner, the parser and the resolver try to catch as many errors as possible before running the
//! code, most errors can only be caught at runtime. For example, the following expression is valid
//! Rocks syntax but it is semantically invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a mapping of
//! variable names to their values. The environment is implemented in the [`environment`](environment)
//! module as a stack of hash maps. Each hash map represents a scope in the program. This allows the
//! interpreter to implement lexical scoping. The interpreter also manages the call stack.

use std::fs;
use std::io::{self, Write};

pub mod ast;
pub mod bytecode;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Reporter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Whether a run completed cleanly, hit a static (scan/parse/resolve) error,
/// or a runtime error. Mirrors the three exit codes the CLI surface uses.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    StaticError,
    RuntimeError,
}

/// The embeddable core: owns the tree-walk interpreter's persistent state
/// (globals, and whatever locals a REPL has accumulated across lines) and
/// drives source text through scan, parse, resolve and interpret. Output
/// only ever goes to the `output` sink handed to [`rocks::new`]; diagnostics
/// are formatted by a [`Reporter`] and written to stderr.
#[allow(non_camel_case_types)]
pub struct rocks<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> rocks<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        rocks {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Reads `path` and runs it as a complete program. Returns the outcome so
    /// the caller can translate it into a process exit code; this function
    /// never calls `process::exit` itself so it stays usable from tests and
    /// embedders.
    pub fn run_file(&mut self, path: String) -> Outcome {
        let contents = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("could not read '{path}': {err}"));

        self.run(&contents)
    }

    /// Runs an interactive read-eval-print loop over stdin, printing each
    /// line's result (if any) and never exiting on a single line's error.
    /// This is the plain fallback loop; the `rocks` binary itself drives the
    /// REPL with `rustyline` instead so it gets history and line editing, and
    /// calls [`rocks::run_line`] directly for each line it reads.
    pub fn run_prompt(&mut self) {
        let mut line = String::new();
        loop {
            print!("> ");
            io::stdout().flush().expect("stdout to be writable");

            line.clear();
            match io::stdin().read_line(&mut line) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    self.run_line(&line);
                }
                Err(_) => break,
            }
        }
    }

    /// Runs a single line or file's worth of source through the full
    /// scan/parse/resolve/interpret pipeline.
    pub fn run_line(&mut self, source: &str) -> Outcome {
        self.run(source)
    }

    fn run(&mut self, source: &str) -> Outcome {
        let mut reporter = Reporter::new();

        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        for error in &scan_errors {
            eprintln!("{}", reporter.report_scan(error));
        }
        if reporter.had_error() {
            return Outcome::StaticError;
        }

        let (statements, parse_errors) = Parser::new(tokens).parse();
        for error in &parse_errors {
            eprintln!("{}", reporter.report_parse(error));
        }
        if reporter.had_error() {
            return Outcome::StaticError;
        }

        let resolve_errors = Resolver::new(&mut self.interpreter).resolve(&statements);
        for error in &resolve_errors {
            eprintln!("{}", reporter.report_resolve(error));
        }
        if reporter.had_error() {
            return Outcome::StaticError;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            eprintln!("{}", reporter.report_runtime(&error));
            return Outcome::RuntimeError;
        }

        Outcome::Ok
    }
}
