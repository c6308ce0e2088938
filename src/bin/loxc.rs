use std::io::{self, Write};
use std::{env, fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rocks_lang::bytecode::{Compiler, VM};
use rocks_lang::error::Reporter;
use rocks_lang::parser::Parser;
use rocks_lang::scanner::Scanner;
use rocks_lang::Outcome;

/// `loxc` is the bytecode sibling of the `rocks` tree-walker: same CLI
/// contract (REPL or a single script, same exit codes), compiled and run
/// through [`rocks_lang::bytecode`] instead. Only the subset of the language
/// the bytecode compiler currently supports will run here; anything else
/// surfaces as a compile error rather than executing on the tree-walker.
fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: loxc [script]");
            process::exit(64);
        }
        2 => run_file(&args[1]),
        _ => run_prompt(),
    }
}

fn run_file(path: &str) {
    let contents = fs::read_to_string(path).unwrap_or_else(|err| panic!("could not read '{path}': {err}"));

    let mut stdout = io::stdout();
    let mut vm = VM::new();
    let outcome = run(&contents, &mut vm, &mut stdout);

    match outcome {
        Outcome::Ok => process::exit(0),
        Outcome::StaticError => process::exit(65),
        Outcome::RuntimeError => process::exit(70),
    }
}

fn run_prompt() {
    let mut stdout = io::stdout();
    let mut vm = VM::new();

    let history_path = home::home_dir().map(|home| home.join(".loxc_history"));

    let mut editor = DefaultEditor::new().expect("readline editor to initialize");
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                run(&line, &mut vm, &mut stdout);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(_) => break,
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
}

/// Runs a single line or file's worth of source through scan, parse, compile
/// and VM execution. The VM's global table persists across calls so a REPL
/// session can build on variables declared in earlier lines; the compiler is
/// rebuilt fresh each time since it carries no state past a single chunk.
fn run(source: &str, vm: &mut VM, output: &mut dyn Write) -> Outcome {
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

    let chunk = match Compiler::new().compile(&statements) {
        Ok(chunk) => chunk,
        Err(error) => {
            eprintln!("{}", reporter.report_compile(&error));
            return Outcome::StaticError;
        }
    };

    if let Err(error) = vm.run(&chunk, output) {
        eprintln!("{}", reporter.report_vm(&error));
        return Outcome::RuntimeError;
    }

    Outcome::Ok
}
