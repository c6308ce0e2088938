#[macro_use]
mod common;

#[cfg(test)]
mod method {
    lox_test!(
        method_sees_its_own_arguments,
        r#"
        class Scale {
            apply(n) { return n * 2; }
        }
        print Scale().apply(21);
        "#,
        ok: "42"
    );

    lox_test!(
        method_arity_mismatch_is_a_runtime_error,
        "class Foo { bar(a, b) { return a + b; } } Foo().bar(1);",
        runtime_error
    );

    lox_test!(
        method_can_be_stored_and_called_later,
        r#"
        class Box {
            value() { return "boxed"; }
        }
        var m = Box().value;
        print m();
        "#,
        ok: "boxed"
    );
}
