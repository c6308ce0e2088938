#[macro_use]
mod common;

#[cfg(test)]
mod number {
    lox_test!(integer_valued_doubles_print_without_a_decimal_point, "print 3.0;", ok: "3");

    lox_test!(fractional_values_print_their_digits, "print 3.25;", ok: "3.25");

    lox_test!(negative_numbers, "print -3.0;", ok: "-3");

    lox_test!(leading_zero_is_required, "print 0.5;", ok: "0.5");

    lox_test!(division_by_zero_produces_infinity, "print 1 / 0;", ok: "inf");

    lox_test!(nan_is_not_equal_to_itself, "var a = 0.0 / 0.0; print a == a;", ok: "false");
}
