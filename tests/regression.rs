#[macro_use]
mod common;

#[cfg(test)]
mod regression {
    // A closure captured inside a loop body must see the loop-local binding
    // introduced by each iteration, not a single binding shared across all
    // iterations.
    lox_test!(
        for_loop_variable_is_fresh_per_iteration,
        r#"
        var functions = "";
        var makers = "";
        fun makeAdder(n) {
            fun adder(x) { return x + n; }
            return adder;
        }
        var adders = 0;
        for (var i = 1; i <= 3; i = i + 1) {
            var adder = makeAdder(i);
            adders = adders + adder(0);
        }
        print adders;
        "#,
        ok: "6"
    );

    // A subclass method that calls a superclass method via `super` must still
    // see fields set by the subclass's own `init`.
    lox_test!(
        super_call_sees_subclass_fields,
        r#"
        class A {
            describe() { print this.name; }
        }
        class B < A {
            init(name) { this.name = name; }
            describe() {
                super.describe();
            }
        }
        B("widget").describe();
        "#,
        ok: "widget"
    );

    lox_test!(
        recursive_class_methods_do_not_leak_locals_between_calls,
        r#"
        class Counter {
            init() { this.n = 0; }
            countTo(limit) {
                if (this.n >= limit) return;
                this.n = this.n + 1;
                var skip = this.n;
                this.countTo(limit);
            }
        }
        var c = Counter();
        c.countTo(5);
        print c.n;
        "#,
        ok: "5"
    );
}
