use super::{Column, Ident, LineNumber};
use std::rc::Rc;

/// One executable unit, the closed set of statement kinds. Dispatch in
/// the runtime is an exhaustive match over this enum.
#[derive(Debug, PartialEq)]
pub enum Statement {
    Clear(Column),
    Cursor(Column, Expression, Expression),
    Data(Column, Vec<Expression>),
    Dim(Column, Ident, Expression),
    End(Column),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Get(Column, Variable),
    Gosub(Column, LineNumber),
    Goto(Column, LineNumber),
    Home(Column),
    If(Column, Expression, ThenDo),
    Input(Column, Option<Rc<str>>, Vec<Variable>),
    Let(Column, Variable, Expression),
    Next(Column, Option<Ident>),
    Poll(Column, Variable),
    Print(Column, Vec<Expression>),
    Read(Column, Vec<Variable>),
    Rem(Column),
    Return(Column),
    Stop(Column),
}

/// Target of IF..THEN: a jump to a line or one inline statement.
#[derive(Debug, PartialEq)]
pub enum ThenDo {
    Line(LineNumber),
    Statement(Box<Statement>),
}

/// Assignment or input target.
#[derive(Debug, PartialEq)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Box<Expression>),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Number(Column, f64),
    String(Column, Rc<str>),
    Char(Column, char),
    Var(Column, Ident),
    Array(Column, Ident, Box<Expression>),
    Negation(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}
