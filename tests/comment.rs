#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    lox_test!(
        line_comment_is_ignored,
        r#"
        // this entire line is a comment
        print "ok"; // trailing comment too
        "#,
        ok: "ok"
    );

    lox_test!(
        comment_only_program_prints_nothing,
        "// nothing to see here",
        ok:
    );

    lox_test!(
        block_only_comments_between_statements,
        "print \"first\";\n// comment\nprint \"second\";",
        ok: "first", "second"
    );
}
