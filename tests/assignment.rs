#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    lox_test!(
        global,
        "var a = \"before\"; print a; a = \"after\"; print a;",
        ok: "before", "after"
    );

    lox_test!(
        local,
        "{ var a = \"before\"; print a; a = \"after\"; print a; }",
        ok: "before", "after"
    );

    lox_test!(
        is_an_expression,
        "var a = 1; print a = 2;",
        ok: "2"
    );

    lox_test!(
        right_associative,
        "var a = 1; var b = 1; var c = 1; a = b = c = 2; print a; print b; print c;",
        ok: "2", "2", "2"
    );

    lox_test!(invalid_target, "var a = 1; (a) = 2;", static_error);

    lox_test!(undefined, "unknown = 1;", runtime_error);
}
