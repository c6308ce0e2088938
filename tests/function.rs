#[macro_use]
mod common;

#[cfg(test)]
mod function {
    lox_test!(
        prints_its_name,
        "fun foo() {} print foo;",
        ok: "<fn foo>"
    );

    lox_test!(
        recursion,
        r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(8);
        "#,
        ok: "21"
    );

    lox_test!(
        no_explicit_return_yields_nil,
        "fun f() {} print f();",
        ok: "nil"
    );

    lox_test!(
        parameters_are_local_to_the_call,
        r#"
        fun f(a) {
            a = a + 1;
            print a;
        }
        var a = 1;
        f(a);
        print a;
        "#,
        ok: "2", "1"
    );

    lox_test!(mutual_recursion_via_globals, r#"
        fun isEven(n) {
            if (n == 0) return true;
            return isOdd(n - 1);
        }
        fun isOdd(n) {
            if (n == 0) return false;
            return isEven(n - 1);
        }
        print isEven(10);
        "#, ok: "true");
}
