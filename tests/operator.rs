#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    lox_test!(add_numbers, "print 1 + 2;", ok: "3");

    lox_test!(concatenate_strings, "print \"foo\" + \"bar\";", ok: "foobar");

    lox_test!(adding_a_number_to_a_string_is_a_runtime_error, "print 1 + \"bar\";", runtime_error);

    lox_test!(subtract, "print 4 - 1;", ok: "3");

    lox_test!(subtracting_strings_is_a_runtime_error, "print \"4\" - \"1\";", runtime_error);

    lox_test!(multiply, "print 3 * 4;", ok: "12");

    lox_test!(divide, "print 8 / 2;", ok: "4");

    lox_test!(negate, "print -(3);", ok: "-3");

    lox_test!(negating_a_string_is_a_runtime_error, "print -\"foo\";", runtime_error);

    lox_test!(comparison, "print 1 < 2; print 2 <= 2; print 3 > 2; print 2 >= 3;", ok: "true", "true", "true", "false");

    lox_test!(comparing_strings_is_a_runtime_error, "print \"a\" < \"b\";", runtime_error);

    lox_test!(equality_across_types_is_always_false, "print 1 == \"1\"; print nil == false;", ok: "false", "false");
}
