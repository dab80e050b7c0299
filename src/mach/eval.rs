use super::{Val, Var};
use crate::error;
use crate::lang::ast::Expression;
use crate::lang::{Column, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Evaluate an expression against the variable environment. Reads
/// only; all side effects belong to statement execution.
pub fn evaluate(expr: &Expression, vars: &Var) -> Result<Val> {
    use Expression::*;
    match expr {
        Number(_, n) => Ok(Val::Number(*n)),
        String(_, s) => Ok(Val::String(s.clone())),
        Char(_, c) => Ok(Val::String(Rc::from(c.to_string().as_str()))),
        Var(_, ident) => Ok(vars.fetch(ident.name())),
        Array(col, ident, index) => {
            let index = number(evaluate(index, vars)?, col)?;
            vars.fetch_element(ident.name(), index)
                .map_err(|e| e.in_column(col))
        }
        Negation(col, expr) => {
            let n = number(evaluate(expr, vars)?, col)?;
            Ok(Val::Number(-n))
        }
        Power(col, lhs, rhs) => {
            let lhs = number(evaluate(lhs, vars)?, col)?;
            let rhs = number(evaluate(rhs, vars)?, col)?;
            let n = lhs.powf(rhs);
            if n.is_nan() {
                return Err(error!(IllegalFunctionCall, ..col; "RESULT IS NOT A REAL NUMBER"));
            }
            finite(n, col)
        }
        Multiply(col, lhs, rhs) => arithmetic(lhs, rhs, vars, col, |a, b| a * b),
        Divide(col, lhs, rhs) => {
            let lhs = number(evaluate(lhs, vars)?, col)?;
            let rhs = number(evaluate(rhs, vars)?, col)?;
            if rhs == 0.0 {
                return Err(error!(DivisionByZero, ..col));
            }
            finite(lhs / rhs, col)
        }
        Add(col, lhs, rhs) => {
            match (evaluate(lhs, vars)?, evaluate(rhs, vars)?) {
                (Val::Number(a), Val::Number(b)) => finite(a + b, col),
                // Plus concatenates when both sides are strings.
                (Val::String(a), Val::String(b)) => {
                    Ok(Val::String(Rc::from(format!("{}{}", a, b).as_str())))
                }
                _ => Err(error!(TypeMismatch, ..col)),
            }
        }
        Subtract(col, lhs, rhs) => arithmetic(lhs, rhs, vars, col, |a, b| a - b),
        Equal(col, lhs, rhs) => relation(lhs, rhs, vars, col, |o| o == std::cmp::Ordering::Equal),
        NotEqual(col, lhs, rhs) => {
            relation(lhs, rhs, vars, col, |o| o != std::cmp::Ordering::Equal)
        }
        Less(col, lhs, rhs) => relation(lhs, rhs, vars, col, |o| o == std::cmp::Ordering::Less),
        LessEqual(col, lhs, rhs) => {
            relation(lhs, rhs, vars, col, |o| o != std::cmp::Ordering::Greater)
        }
        Greater(col, lhs, rhs) => {
            relation(lhs, rhs, vars, col, |o| o == std::cmp::Ordering::Greater)
        }
        GreaterEqual(col, lhs, rhs) => {
            relation(lhs, rhs, vars, col, |o| o != std::cmp::Ordering::Less)
        }
        And(col, lhs, rhs) => logical(lhs, rhs, vars, col, |a, b| a && b),
        Or(col, lhs, rhs) => logical(lhs, rhs, vars, col, |a, b| a || b),
    }
}

fn number(val: Val, col: &Column) -> Result<f64> {
    match val {
        Val::Number(n) => Ok(n),
        Val::String(_) => Err(error!(TypeMismatch, ..col)),
    }
}

fn finite(n: f64, col: &Column) -> Result<Val> {
    if n.is_finite() {
        Ok(Val::Number(n))
    } else {
        Err(error!(Overflow, ..col))
    }
}

fn arithmetic<F: Fn(f64, f64) -> f64>(
    lhs: &Expression,
    rhs: &Expression,
    vars: &Var,
    col: &Column,
    op: F,
) -> Result<Val> {
    let lhs = number(evaluate(lhs, vars)?, col)?;
    let rhs = number(evaluate(rhs, vars)?, col)?;
    finite(op(lhs, rhs), col)
}

// Relations compare like types only; the result is 1 or 0.
fn relation<F: Fn(std::cmp::Ordering) -> bool>(
    lhs: &Expression,
    rhs: &Expression,
    vars: &Var,
    col: &Column,
    test: F,
) -> Result<Val> {
    let ordering = match (evaluate(lhs, vars)?, evaluate(rhs, vars)?) {
        (Val::Number(a), Val::Number(b)) => match a.partial_cmp(&b) {
            Some(o) => o,
            None => return Err(error!(IllegalFunctionCall, ..col)),
        },
        (Val::String(a), Val::String(b)) => a.cmp(&b),
        _ => return Err(error!(TypeMismatch, ..col)),
    };
    Ok(Val::Number(if test(ordering) { 1.0 } else { 0.0 }))
}

fn logical<F: Fn(bool, bool) -> bool>(
    lhs: &Expression,
    rhs: &Expression,
    vars: &Var,
    col: &Column,
    op: F,
) -> Result<Val> {
    let lhs = number(evaluate(lhs, vars)?, col)? != 0.0;
    let rhs = number(evaluate(rhs, vars)?, col)? != 0.0;
    Ok(Val::Number(if op(lhs, rhs) { 1.0 } else { 0.0 }))
}
