#[macro_use]
mod common;

#[cfg(test)]
mod field {
    lox_test!(
        get_and_set_on_instance,
        r#"
        class Foo {}
        var foo = Foo();
        foo.bar = "baz";
        print foo.bar;
        "#,
        ok: "baz"
    );

    lox_test!(
        set_returns_the_assigned_value,
        r#"
        class Foo {}
        var foo = Foo();
        print foo.bar = "baz";
        "#,
        ok: "baz"
    );

    lox_test!(get_on_a_non_instance_is_a_runtime_error, "var a = 1; print a.bar;", runtime_error);

    lox_test!(set_on_a_non_instance_is_a_runtime_error, "var a = 1; a.bar = 2;", runtime_error);

    lox_test!(
        fields_may_shadow_methods,
        r#"
        class Foo {
            bar() { return "method"; }
        }
        var foo = Foo();
        foo.bar = "field";
        print foo.bar;
        "#,
        ok: "field"
    );
}
