#[macro_use]
mod common;

#[cfg(test)]
mod return_ {
    lox_test!(returns_a_value, "fun f() { return 1; } print f();", ok: "1");

    lox_test!(early_return_skips_the_rest_of_the_body, "fun f() { return 1; print \"unreachable\"; } print f();", ok: "1");

    lox_test!(bare_return_yields_nil, "fun f() { return; } print f();", ok: "nil");

    lox_test!(falling_off_the_end_yields_nil, "fun f() { 1 + 1; } print f();", ok: "nil");

    lox_test!(return_outside_a_function_is_a_static_error, "return 1;", static_error);

    lox_test!(
        return_unwinds_nested_blocks,
        r#"
        fun f() {
            if (true) {
                if (true) {
                    return "deep";
                }
            }
            return "shallow";
        }
        print f();
        "#,
        ok: "deep"
    );
}
