use std::io;
use std::{env, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rocks_lang::{rocks, Outcome};

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: rocks [script]");
            process::exit(64);
        }
        2 => run_file(&args[1]),
        _ => run_prompt(),
    }
}

fn run_file(path: &str) {
    let mut stdout = io::stdout();
    let mut interpreter = rocks::new(&mut stdout);

    let outcome = interpreter.run_file(path.to_string());

    match outcome {
        Outcome::Ok => process::exit(0),
        Outcome::StaticError => process::exit(65),
        Outcome::RuntimeError => process::exit(70),
    }
}

/// Drives the REPL with `rustyline` for line editing and history, saved
/// under the user's home directory between sessions.
fn run_prompt() {
    let mut stdout = io::stdout();
    let mut interpreter = rocks::new(&mut stdout);

    let history_path = home::home_dir().map(|home| home.join(".rocks_history"));

    let mut editor = DefaultEditor::new().expect("readline editor to initialize");
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                interpreter.run_line(&line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(_) => break,
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
}
