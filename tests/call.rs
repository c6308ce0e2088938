#[macro_use]
mod common;

#[cfg(test)]
mod call {
    lox_test!(call_on_a_number_is_a_runtime_error, "var a = 1; a();", runtime_error);

    lox_test!(call_on_a_string_is_a_runtime_error, "\"not a function\"();", runtime_error);

    lox_test!(call_on_nil_is_a_runtime_error, "nil();", runtime_error);

    lox_test!(
        too_few_arguments_is_a_runtime_error,
        "fun f(a, b) { return a + b; } f(1);",
        runtime_error
    );

    lox_test!(
        too_many_arguments_is_a_runtime_error,
        "fun f(a) { return a; } f(1, 2);",
        runtime_error
    );
}
