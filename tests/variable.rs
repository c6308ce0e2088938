#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    lox_test!(uninitialized_variable_is_nil, "var a; print a;", ok: "nil");

    lox_test!(redeclaring_a_global_is_allowed, "var a = 1; var a = 2; print a;", ok: "2");

    lox_test!(redeclaring_a_local_in_the_same_scope_is_a_static_error, "{ var a = 1; var a = 2; }", static_error);

    lox_test!(
        shadowing_in_a_nested_scope_is_allowed,
        "var a = 1; { var a = a + 1; print a; } print a;",
        ok: "2", "1"
    );

    lox_test!(self_referencing_initializer_is_a_static_error, "{ var a = a; }", static_error);

    lox_test!(using_an_undeclared_variable_is_a_runtime_error, "print notDeclared;", runtime_error);

    lox_test!(
        assignment_does_not_declare_a_new_variable,
        "var a = 1; { a = 2; } print a;",
        ok: "2"
    );
}
