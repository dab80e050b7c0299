mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_input_number() {
    let output = run_with_input(&["10 INPUT A", "20 PRINT A*2"], &["21"]);
    assert_eq!(output, "? 21\n42\n");
}

#[test]
fn test_input_with_prompt() {
    let output = run_with_input(&["10 INPUT \"AGE\"; A", "20 PRINT A"], &["7"]);
    assert_eq!(output, "AGE? 7\n7\n");
}

#[test]
fn test_input_multiple_fields() {
    let output = run_with_input(&["10 INPUT A, B", "20 PRINT A+B"], &["3,4"]);
    assert_eq!(output, "? 3,4\n7\n");
}

#[test]
fn test_single_string_takes_whole_line() {
    let output = run_with_input(&["10 INPUT A$", "20 PRINT A$"], &["HELLO, WORLD"]);
    assert_eq!(output, "? HELLO, WORLD\nHELLO, WORLD\n");
}

#[test]
fn test_input_rejects_bad_number() {
    let mut term = TestTerm::with_input(&["SEVEN"]);
    let error = program(&["10 INPUT A"]).execute(&mut term).unwrap_err();
    assert_eq!(error.code(), ErrorCode::TypeMismatch);
    assert_eq!(error.line_number(), Some(10));
}

#[test]
fn test_input_field_count_must_match() {
    let mut term = TestTerm::with_input(&["1"]);
    let error = program(&["10 INPUT A, B"]).execute(&mut term).unwrap_err();
    assert_eq!(error.code(), ErrorCode::TypeMismatch);
}

#[test]
fn test_get_numeric_is_char_code() {
    let mut term = TestTerm::with_keys(&[65]);
    program(&["10 GET K", "20 PRINT K"])
        .execute(&mut term)
        .unwrap();
    assert_eq!(term.output, "65\n");
}

#[test]
fn test_get_string_is_char() {
    let mut term = TestTerm::with_keys(&[65]);
    program(&["10 GET K$", "20 PRINT K$"])
        .execute(&mut term)
        .unwrap();
    assert_eq!(term.output, "A\n");
}

#[test]
fn test_poll_with_pending_key() {
    let mut term = TestTerm::with_keys(&[66]);
    program(&["10 POLL K$", "20 PRINT K$"])
        .execute(&mut term)
        .unwrap();
    assert_eq!(term.output, "B\n");
}

#[test]
fn test_poll_without_key() {
    let source = &["10 POLL K$", "20 PRINT K$;\"|\"", "30 POLL N", "40 PRINT N"];
    assert_eq!(run(source), "|\n0\n");
}
