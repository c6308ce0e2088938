#[macro_use]
mod common;

#[cfg(test)]
mod super_ {
    lox_test!(
        calls_the_superclass_method,
        r#"
        class A {
            method() { print "A method"; }
        }
        class B < A {
            method() {
                super.method();
                print "B method";
            }
        }
        B().method();
        "#,
        ok: "A method", "B method"
    );

    lox_test!(
        resolves_against_the_lexical_superclass_not_the_runtime_receiver,
        r#"
        class A {
            method() { print "A"; }
        }
        class B < A {
            method() { print "B"; }
        }
        class C < B {
            method() { super.method(); }
        }
        C().method();
        "#,
        ok: "B"
    );

    lox_test!(super_outside_a_class_is_a_static_error, "super.foo();", static_error);

    lox_test!(super_in_a_class_with_no_superclass_is_a_static_error, "class A { method() { super.method(); } }", static_error);
}
