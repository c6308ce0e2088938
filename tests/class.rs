#[macro_use]
mod common;

#[cfg(test)]
mod class {
    lox_test!(
        prints_as_its_name,
        "class Foo {} print Foo;",
        ok: "Foo"
    );

    lox_test!(
        instance_prints_as_class_instance,
        "class Foo {} print Foo();",
        ok: "Foo instance"
    );

    lox_test!(
        methods_are_called_on_instances,
        r#"
        class Greeter {
            greet(name) {
                print "hello " + name;
            }
        }
        Greeter().greet("world");
        "#,
        ok: "hello world"
    );

    lox_test!(calling_an_undefined_method_is_a_runtime_error, "class Foo {} Foo().bar();", runtime_error);

    lox_test!(reading_an_undefined_field_is_a_runtime_error, "class Foo {} print Foo().bar;", runtime_error);

    lox_test!(redeclaring_a_class_in_its_own_initializer_is_a_static_error, "class Foo < Foo {}", static_error);
}
