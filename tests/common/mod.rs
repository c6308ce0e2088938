use rocks_lang::{rocks, Outcome};

/// Runs `source` as a single program against a fresh interpreter and
/// captures everything it printed. Diagnostics go straight to stderr from
/// inside [`rocks_lang::rocks::run_line`], so callers that care about the
/// failure kind (but not the exact wording) check the returned [`Outcome`].
pub fn run(source: &str) -> (String, Outcome) {
    let mut output = Vec::new();
    let mut interpreter = rocks::new(&mut output);
    let outcome = interpreter.run_line(source);
    drop(interpreter);
    (String::from_utf8(output).expect("output to be valid utf8"), outcome)
}

/// Declares a test that runs a Lox snippet, either asserting its captured
/// stdout line-for-line or asserting that it was rejected at a given stage
/// (static analysis or at runtime).
#[macro_export]
macro_rules! lox_test {
    ($name:ident, $source:expr, ok: $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            let (output, outcome) = $crate::common::run($source);
            assert_eq!(rocks_lang::Outcome::Ok, outcome, "unexpected non-zero outcome, output so far: {output:?}");
            let mut expected_lines: Vec<&str> = vec![$($expected),*];
            let expected = if expected_lines.is_empty() {
                String::new()
            } else {
                expected_lines.push("");
                expected_lines.join("\n")
            };
            assert_eq!(expected, output);
        }
    };
    ($name:ident, $source:expr, static_error) => {
        #[test]
        fn $name() {
            let (_output, outcome) = $crate::common::run($source);
            assert_eq!(rocks_lang::Outcome::StaticError, outcome);
        }
    };
    ($name:ident, $source:expr, runtime_error) => {
        #[test]
        fn $name() {
            let (_output, outcome) = $crate::common::run($source);
            assert_eq!(rocks_lang::Outcome::RuntimeError, outcome);
        }
    };
}
