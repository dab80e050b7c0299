mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_precedence() {
    assert_eq!(run(&["10 PRINT 2+3*4"]), "14\n");
    assert_eq!(run(&["10 PRINT (2+3)*4"]), "20\n");
    assert_eq!(run(&["10 PRINT 10-4-3"]), "3\n");
}

#[test]
fn test_power_binds_tighter_than_unary_minus() {
    assert_eq!(run(&["10 PRINT -2^2"]), "-4\n");
    assert_eq!(run(&["10 PRINT (-2)^2"]), "4\n");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(run(&["10 PRINT 2^3^2"]), "512\n");
}

#[test]
fn test_division_by_zero() {
    let error = run_err(&["10 PRINT 1/0"]);
    assert_eq!(error.code(), ErrorCode::DivisionByZero);
    assert_eq!(error.line_number(), Some(10));
}

#[test]
fn test_relational_results_are_one_and_zero() {
    assert_eq!(run(&["10 PRINT 1 < 2"]), "1\n");
    assert_eq!(run(&["10 PRINT 1 > 2"]), "0\n");
    assert_eq!(run(&["10 PRINT 2 >= 2"]), "1\n");
    assert_eq!(run(&["10 PRINT 2 <> 2"]), "0\n");
}

#[test]
fn test_string_relational() {
    assert_eq!(run(&["10 PRINT \"APE\" < \"BEE\""]), "1\n");
    assert_eq!(run(&["10 PRINT \"A\" = \"A\""]), "1\n");
}

#[test]
fn test_string_concat() {
    assert_eq!(run(&["10 PRINT \"FOO\"+\"BAR\""]), "FOOBAR\n");
}

#[test]
fn test_mixed_types_never_coerce() {
    assert_eq!(run_err(&["10 PRINT \"A\"+1"]).code(), ErrorCode::TypeMismatch);
    assert_eq!(
        run_err(&["10 PRINT \"A\" < 1"]).code(),
        ErrorCode::TypeMismatch
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(run(&["10 PRINT 1 AND 0"]), "0\n");
    assert_eq!(run(&["10 PRINT 1 OR 0"]), "1\n");
    assert_eq!(run(&["10 PRINT 1 < 2 AND 3 < 4"]), "1\n");
}

#[test]
fn test_power_overflow() {
    assert_eq!(run_err(&["10 PRINT 9^999999"]).code(), ErrorCode::Overflow);
}

#[test]
fn test_power_of_negative_base() {
    let error = run_err(&["10 PRINT (0-2)^0.5"]);
    assert_eq!(error.code(), ErrorCode::IllegalFunctionCall);
}

#[test]
fn test_unset_variables_default() {
    assert_eq!(run(&["10 PRINT X"]), "0\n");
    assert_eq!(run(&["10 PRINT X$"]), "\n");
}
