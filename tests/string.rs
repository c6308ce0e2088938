#[macro_use]
mod common;

#[cfg(test)]
mod string {
    lox_test!(prints_its_contents, "print \"hello world\";", ok: "hello world");

    lox_test!(empty_string, "print \"\";", ok: "");

    lox_test!(
        strings_span_multiple_lines,
        "print \"line one\nline two\";",
        ok: "line one\nline two"
    );

    lox_test!(unterminated_string_is_a_static_error, "print \"unterminated;", static_error);

    lox_test!(equality_is_by_content, "print \"a\" == \"a\"; print \"a\" == \"b\";", ok: "true", "false");
}
