mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_counting_loop() {
    let source = &["10 FOR I = 1 TO 3", "20 PRINT I", "30 NEXT I"];
    assert_eq!(run(source), "1\n2\n3\n");
}

#[test]
fn test_step() {
    let source = &["10 FOR I = 1 TO 9 STEP 2", "20 PRINT I;", "30 NEXT I"];
    assert_eq!(run(source), "13579");
}

#[test]
fn test_negative_step() {
    let source = &["10 FOR I = 3 TO 1 STEP -1", "20 PRINT I;", "30 NEXT I"];
    assert_eq!(run(source), "321");
}

#[test]
fn test_body_always_runs_once() {
    let source = &["10 FOR I = 1 TO 0", "20 PRINT I", "30 NEXT I"];
    assert_eq!(run(source), "1\n");
}

#[test]
fn test_variable_after_loop() {
    let source = &["10 FOR I = 1 TO 3", "20 NEXT I", "30 PRINT I"];
    assert_eq!(run(source), "4\n");
}

#[test]
fn test_trip_count_with_step() {
    // From 2 by 3 stays within 10 for 2, 5, 8 and stops at 11.
    let source = &[
        "10 FOR I = 2 TO 10 STEP 3",
        "20 PRINT I;",
        "30 NEXT I",
        "40 PRINT : PRINT I",
    ];
    assert_eq!(run(source), "258\n11\n");
}

#[test]
fn test_nested_loops() {
    let source = &[
        "10 FOR I = 1 TO 2",
        "20 FOR J = 1 TO 2",
        "30 PRINT I*10+J;",
        "40 NEXT J",
        "50 NEXT I",
    ];
    assert_eq!(run(source), "11122122");
}

#[test]
fn test_loop_on_one_line() {
    assert_eq!(run(&["10 FOR I = 1 TO 3 : PRINT I; : NEXT I"]), "123");
}

#[test]
fn test_anonymous_next() {
    let source = &["10 FOR I = 1 TO 2", "20 PRINT I;", "30 NEXT"];
    assert_eq!(run(source), "12");
}

#[test]
fn test_next_without_for() {
    let error = run_err(&["10 NEXT"]);
    assert_eq!(error.code(), ErrorCode::NextWithoutFor);
    assert_eq!(error.line_number(), Some(10));
}

#[test]
fn test_mismatched_next() {
    let error = run_err(&["10 FOR I = 1 TO 2", "20 NEXT J"]);
    assert_eq!(error.code(), ErrorCode::NextWithoutFor);
    assert_eq!(error.line_number(), Some(20));
}

#[test]
fn test_string_control_variable_rejected() {
    let error = run_err(&["10 FOR A$ = 1 TO 2", "20 NEXT"]);
    assert_eq!(error.code(), ErrorCode::TypeMismatch);
}
