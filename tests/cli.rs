use assert_cmd::Command;

fn script_file(contents: &str) -> tempfile_path::TempPath {
    tempfile_path::TempPath::with_contents(contents)
}

mod tempfile_path {
    use std::fs;
    use std::path::PathBuf;

    /// A throwaway `.lox` file cleaned up on drop, scoped to a single test.
    /// Stands in for a real tempfile crate: neither the teacher nor the rest
    /// of the pack pulls one in for a single-writer, single-reader file.
    pub struct TempPath(PathBuf);

    impl TempPath {
        pub fn with_contents(contents: &str) -> Self {
            let mut path = std::env::temp_dir();
            path.push(format!("rocks-cli-test-{}-{}.lox", std::process::id(), fastrand_like()));
            fs::write(&path, contents).expect("write temp script");
            TempPath(path)
        }

        pub fn path(&self) -> &std::path::Path {
            &self.0
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    // No randomness crate in the dependency stack either; a thread-local
    // counter is enough to keep parallel tests from colliding on a file name.
    fn fastrand_like() -> u64 {
        use std::cell::Cell;
        thread_local!(static COUNTER: Cell<u64> = Cell::new(0));
        COUNTER.with(|c| {
            let next = c.get() + 1;
            c.set(next);
            next
        })
    }
}

#[test]
fn rocks_runs_a_script_file_and_exits_zero() {
    let script = script_file("print 1 + 2;");
    Command::cargo_bin("rocks")
        .unwrap()
        .arg(script.path())
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn rocks_exits_65_on_a_static_error() {
    let script = script_file("var a = ;");
    Command::cargo_bin("rocks").unwrap().arg(script.path()).assert().code(65);
}

#[test]
fn rocks_exits_70_on_a_runtime_error() {
    let script = script_file("print 1 + nil;");
    Command::cargo_bin("rocks").unwrap().arg(script.path()).assert().code(70);
}

#[test]
fn rocks_exits_64_and_prints_usage_with_too_many_arguments() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("one")
        .arg("two")
        .assert()
        .code(64)
        .stderr("Usage: rocks [script]\n");
}

#[test]
fn loxc_runs_a_script_file_and_exits_zero() {
    let script = script_file("var a = 1; print a;");
    Command::cargo_bin("loxc")
        .unwrap()
        .arg(script.path())
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn loxc_exits_65_on_a_construct_outside_the_compiled_subset() {
    let script = script_file("fun f() {}");
    Command::cargo_bin("loxc").unwrap().arg(script.path()).assert().code(65);
}

#[test]
fn loxc_exits_64_and_prints_usage_with_too_many_arguments() {
    Command::cargo_bin("loxc")
        .unwrap()
        .arg("one")
        .arg("two")
        .assert()
        .code(64)
        .stderr("Usage: loxc [script]\n");
}
