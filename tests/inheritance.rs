#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    lox_test!(
        inherits_methods_from_superclass,
        r#"
        class Doughnut {
            cook() {
                print "Fry until golden brown.";
            }
        }
        class BostonCream < Doughnut {}
        BostonCream().cook();
        "#,
        ok: "Fry until golden brown."
    );

    lox_test!(
        subclass_can_override_superclass_method,
        r#"
        class A {
            speak() { print "A"; }
        }
        class B < A {
            speak() { print "B"; }
        }
        B().speak();
        "#,
        ok: "B"
    );

    lox_test!(
        inheriting_from_a_non_class_is_a_runtime_error,
        "var NotAClass = 1; class Sub < NotAClass {}",
        runtime_error
    );

    lox_test!(
        grandparent_methods_are_reachable,
        r#"
        class A { greet() { print "hi from A"; } }
        class B < A {}
        class C < B {}
        C().greet();
        "#,
        ok: "hi from A"
    );
}
