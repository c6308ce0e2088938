#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    lox_test!(and_returns_first_falsey_operand, "print false and \"x\"; print nil and \"x\";", ok: "false", "nil");

    lox_test!(and_returns_last_operand_when_all_truthy, "print 1 and 2 and 3;", ok: "3");

    lox_test!(or_returns_first_truthy_operand, "print 1 or 2; print false or \"fallback\";", ok: "1", "fallback");

    lox_test!(or_returns_last_operand_when_all_falsey, "print false or nil;", ok: "nil");

    lox_test!(
        short_circuits_on_the_tree_walker,
        r#"
        fun sideEffect() { print "called"; return true; }
        false and sideEffect();
        print "done";
        "#,
        ok: "done"
    );
}
