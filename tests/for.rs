#[macro_use]
mod common;

#[cfg(test)]
mod for_ {
    lox_test!(
        counts_up,
        "for (var i = 0; i < 3; i = i + 1) { print i; }",
        ok: "0", "1", "2"
    );

    lox_test!(
        clause_parts_are_optional,
        r#"
        var i = 0;
        for (; i < 2; i = i + 1) {
            print i;
        }
        "#,
        ok: "0", "1"
    );

    lox_test!(
        closure_in_the_body_captures_each_iteration_variable,
        r#"
        var closures = "";
        for (var i = 0; i < 3; i = i + 1) {
            var j = i;
            fun show() { closures = closures + j; }
            show();
        }
        print closures;
        "#,
        ok: "012"
    );

    lox_test!(false_condition_never_runs_the_body, "for (var i = 0; false; i = i + 1) { print \"nope\"; } print \"after\";", ok: "after");
}
