use super::eval::evaluate;
use super::{Program, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{Expression, Statement, ThenDo, Variable};
use crate::lang::token::{Literal, Operator, Token, Word};
use crate::lang::{parse, Column, ErrorCode, LineNumber};
use crate::term::Terminal;
use std::rc::Rc;

type Result<T> = std::result::Result<T, crate::lang::Error>;

/// ## Execution engine
///
/// Holds the variable environment, the GOSUB and FOR stacks, the DATA
/// pool and the program counter for one run. Lines are parsed as the
/// counter reaches them, so a bad line is only an error when executed.

pub struct Runtime<'a> {
    program: &'a Program,
    term: &'a mut dyn Terminal,
    vars: Var,
    gosub: Stack<Position>,
    fors: Stack<Frame>,
    data: Vec<Val>,
    data_next: usize,
    pc: Position,
}

/// Program counter: a line number and a statement index within the
/// line. Line 0 is never storable and marks direct mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub line: LineNumber,
    pub statement: usize,
}

#[derive(Debug, Clone)]
struct Frame {
    var: Rc<str>,
    limit: f64,
    step: f64,
    body: Position,
}

#[derive(Debug)]
enum Flow {
    Next,
    Jump(LineNumber),
    Resume(Position),
    Halt,
}

impl<'a> Runtime<'a> {
    pub fn new(program: &'a Program, term: &'a mut dyn Terminal) -> Runtime<'a> {
        let data = collect_data(program);
        Runtime {
            program,
            term,
            vars: Var::new(),
            gosub: Stack::new(ErrorCode::ReturnWithoutGosub),
            fors: Stack::new(ErrorCode::NextWithoutFor),
            data,
            data_next: 0,
            pc: Position {
                line: 0,
                statement: 0,
            },
        }
    }

    /// Run the stored program from its first line. An empty program
    /// finishes immediately.
    pub fn run(&mut self) -> Result<()> {
        match self.program.first_line() {
            Some(line) => self.resume(Position { line, statement: 0 }),
            None => Ok(()),
        }
    }

    /// Execute one unnumbered line. A jump enters the stored program
    /// and does not come back.
    pub fn run_direct(&mut self, tokens: &[Token]) -> Result<()> {
        let statements = parse(tokens)?;
        self.pc = Position {
            line: 0,
            statement: 0,
        };
        while self.pc.statement < statements.len() {
            if self.term.interrupted() {
                return Err(error!(Break));
            }
            match self.execute(&statements[self.pc.statement])? {
                Flow::Next => self.pc.statement += 1,
                Flow::Jump(line) => return self.resume(Position { line, statement: 0 }),
                Flow::Resume(position) if position.line == 0 => self.pc = position,
                Flow::Resume(position) => return self.resume(position),
                Flow::Halt => return Ok(()),
            }
        }
        Ok(())
    }

    fn resume(&mut self, position: Position) -> Result<()> {
        self.pc = position;
        self.interpret().map_err(|e| {
            if e.line_number().is_some() {
                e
            } else {
                e.in_line_number(self.pc.line)
            }
        })
    }

    fn interpret(&mut self) -> Result<()> {
        loop {
            if self.term.interrupted() {
                return Err(error!(Break));
            }
            let tokens = match self.program.tokens(self.pc.line) {
                Some(tokens) => tokens,
                None => return Ok(()),
            };
            let statements = parse(tokens)?;
            if self.pc.statement >= statements.len() {
                match self.program.next_line(self.pc.line) {
                    Some(line) => {
                        self.pc = Position { line, statement: 0 };
                        continue;
                    }
                    None => return Ok(()),
                }
            }
            match self.execute(&statements[self.pc.statement])? {
                Flow::Next => self.pc.statement += 1,
                Flow::Jump(line) => self.pc = Position { line, statement: 0 },
                Flow::Resume(position) => self.pc = position,
                Flow::Halt => return Ok(()),
            }
        }
    }

    fn execute(&mut self, statement: &Statement) -> Result<Flow> {
        match statement {
            Statement::Clear(_) => {
                self.term.clear()?;
                Ok(Flow::Next)
            }
            Statement::Cursor(col, column, row) => {
                let column = self.coordinate(column, col)?;
                let row = self.coordinate(row, col)?;
                self.term.cursor(column, row)?;
                Ok(Flow::Next)
            }
            // The pool is collected before the run starts.
            Statement::Data(..) => Ok(Flow::Next),
            Statement::Dim(col, ident, size) => {
                let size = self.number(size, col)?;
                if size < 0.0 || !size.is_finite() {
                    return Err(error!(IllegalFunctionCall, ..col));
                }
                self.vars
                    .dimension(ident.name(), size as usize)
                    .map_err(|e| e.in_column(col))?;
                Ok(Flow::Next)
            }
            Statement::End(_) => Ok(Flow::Halt),
            Statement::For(col, ident, from, to, step) => {
                if ident.is_string() {
                    return Err(error!(TypeMismatch, ..col));
                }
                let from = self.number(from, col)?;
                let limit = self.number(to, col)?;
                let step = match step {
                    Some(expr) => self.number(expr, col)?,
                    None => 1.0,
                };
                self.vars
                    .store(ident.name(), Val::Number(from))
                    .map_err(|e| e.in_column(col))?;
                self.fors
                    .push(Frame {
                        var: ident.name().clone(),
                        limit,
                        step,
                        body: Position {
                            line: self.pc.line,
                            statement: self.pc.statement + 1,
                        },
                    })
                    .map_err(|e| e.in_column(col))?;
                Ok(Flow::Next)
            }
            Statement::Get(_, variable) => {
                let code = self.term.read_char()?;
                let value = self.key_value(variable, Some(code));
                self.store_value(variable, value)?;
                Ok(Flow::Next)
            }
            Statement::Gosub(col, line) => {
                let line = self.line_target(*line, col)?;
                self.gosub
                    .push(Position {
                        line: self.pc.line,
                        statement: self.pc.statement + 1,
                    })
                    .map_err(|e| e.in_column(col))?;
                Ok(Flow::Jump(line))
            }
            Statement::Goto(col, line) => Ok(Flow::Jump(self.line_target(*line, col)?)),
            Statement::Home(_) => {
                self.term.home()?;
                Ok(Flow::Next)
            }
            Statement::If(col, predicate, then) => {
                let taken = self.number(predicate, col)? != 0.0;
                if !taken {
                    return Ok(Flow::Next);
                }
                match then {
                    ThenDo::Line(line) => Ok(Flow::Jump(self.line_target(*line, col)?)),
                    ThenDo::Statement(statement) => self.execute(statement),
                }
            }
            Statement::Input(col, prompt, variables) => {
                let mut text = String::new();
                if let Some(prompt) = prompt {
                    text.push_str(prompt);
                }
                text.push_str("? ");
                let line = self.term.read_line(&text)?;
                let fields: Vec<String> = if variables.len() <= 1 {
                    vec![line]
                } else {
                    line.split(',').map(|s| s.to_string()).collect()
                };
                if fields.len() != variables.len() {
                    return Err(error!(TypeMismatch, ..col; "WRONG NUMBER OF INPUT FIELDS"));
                }
                for (variable, field) in variables.iter().zip(fields) {
                    let value = if self.is_string_target(variable) {
                        Val::String(Rc::from(field.as_str()))
                    } else {
                        match field.trim().parse::<f64>() {
                            Ok(n) => Val::Number(n),
                            Err(_) => return Err(error!(TypeMismatch, ..col)),
                        }
                    };
                    self.store_value(variable, value)?;
                }
                Ok(Flow::Next)
            }
            Statement::Let(_, variable, expr) => {
                let value = evaluate(expr, &self.vars)?;
                self.store_value(variable, value)?;
                Ok(Flow::Next)
            }
            Statement::Next(col, ident) => {
                let frame = self.fors.pop().map_err(|e| e.in_column(col))?;
                if let Some(ident) = ident {
                    if *ident.name() != frame.var {
                        return Err(error!(NextWithoutFor, ..col));
                    }
                }
                let value = match self.vars.fetch(&frame.var) {
                    Val::Number(n) => n + frame.step,
                    Val::String(_) => return Err(error!(TypeMismatch, ..col)),
                };
                self.vars
                    .store(&frame.var, Val::Number(value))
                    .map_err(|e| e.in_column(col))?;
                let done = if frame.step < 0.0 {
                    value < frame.limit
                } else {
                    value > frame.limit
                };
                if done {
                    Ok(Flow::Next)
                } else {
                    let body = frame.body;
                    self.fors.push(frame).map_err(|e| e.in_column(col))?;
                    Ok(Flow::Resume(body))
                }
            }
            Statement::Poll(_, variable) => {
                let code = self.term.poll_char();
                let value = self.key_value(variable, code);
                self.store_value(variable, value)?;
                Ok(Flow::Next)
            }
            Statement::Print(_, exprs) => {
                for expr in exprs {
                    match expr {
                        Expression::Char(_, '\n') => self.term.newline()?,
                        expr => {
                            let value = evaluate(expr, &self.vars)?;
                            self.term.write(&value.to_string())?;
                        }
                    }
                }
                Ok(Flow::Next)
            }
            Statement::Read(col, variables) => {
                for variable in variables {
                    if self.data_next >= self.data.len() {
                        return Err(error!(OutOfData, ..col));
                    }
                    let value = self.data[self.data_next].clone();
                    self.data_next += 1;
                    self.store_value(variable, value)?;
                }
                Ok(Flow::Next)
            }
            Statement::Rem(_) => Ok(Flow::Next),
            Statement::Return(col) => {
                let position = self.gosub.pop().map_err(|e| e.in_column(col))?;
                Ok(Flow::Resume(position))
            }
            Statement::Stop(_) => Ok(Flow::Halt),
        }
    }

    fn number(&self, expr: &Expression, col: &Column) -> Result<f64> {
        match evaluate(expr, &self.vars)? {
            Val::Number(n) => Ok(n),
            Val::String(_) => Err(error!(TypeMismatch, ..col)),
        }
    }

    fn coordinate(&self, expr: &Expression, col: &Column) -> Result<usize> {
        let n = self.number(expr, col)?;
        if n < 0.0 || !n.is_finite() {
            return Err(error!(IllegalFunctionCall, ..col));
        }
        Ok(n as usize)
    }

    fn line_target(&self, line: LineNumber, col: &Column) -> Result<LineNumber> {
        if self.program.tokens(line).is_some() {
            Ok(line)
        } else {
            Err(error!(UndefinedLine, ..col))
        }
    }

    fn is_string_target(&self, variable: &Variable) -> bool {
        match variable {
            Variable::Unary(_, ident) => ident.is_string(),
            Variable::Array(_, ident, _) => ident.is_string(),
        }
    }

    /// A key arrives as a char code; string targets take the char,
    /// numeric targets the code. No key is the empty string or zero.
    fn key_value(&self, variable: &Variable, code: Option<u32>) -> Val {
        if self.is_string_target(variable) {
            match code.and_then(std::char::from_u32) {
                Some(c) => Val::String(Rc::from(c.to_string().as_str())),
                None => Val::String("".into()),
            }
        } else {
            Val::Number(code.map_or(0.0, f64::from))
        }
    }

    fn store_value(&mut self, variable: &Variable, value: Val) -> Result<()> {
        match variable {
            Variable::Unary(col, ident) => self
                .vars
                .store(ident.name(), value)
                .map_err(|e| e.in_column(col)),
            Variable::Array(col, ident, index) => {
                let index = self.number(index, col)?;
                self.vars
                    .store_element(ident.name(), index, value)
                    .map_err(|e| e.in_column(col))
            }
        }
    }
}

/// Scan the listing tokens for DATA statements and collect every
/// literal in line order. No parse happens here, so unrelated bad
/// lines do not stop a run from starting.
fn collect_data(program: &Program) -> Vec<Val> {
    let mut pool: Vec<Val> = vec![];
    for line_number in program.line_numbers() {
        let tokens = match program.tokens(line_number) {
            Some(tokens) => tokens,
            None => continue,
        };
        for statement in tokens.split(|t| *t == Token::Colon) {
            if statement.first() != Some(&Token::Word(Word::Data)) {
                continue;
            }
            let mut negate = false;
            for token in &statement[1..] {
                match token {
                    Token::Comma => negate = false,
                    Token::Operator(Operator::Minus) => negate = true,
                    Token::Literal(Literal::Number(s)) => {
                        if let Ok(n) = s.parse::<f64>() {
                            pool.push(Val::Number(if negate { -n } else { n }));
                        }
                    }
                    Token::Literal(Literal::String(s)) => {
                        pool.push(Val::String(Rc::from(s.as_str())))
                    }
                    _ => {}
                }
            }
        }
    }
    pool
}
