use super::Runtime;
use crate::error;
use crate::lang::token::Token;
use crate::lang::{lex, Error, LineNumber};
use crate::term::Terminal;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::io::{BufRead, Write};
use std::ops::Bound;

type Result<T> = std::result::Result<T, Error>;

/// ## Program listing
///
/// Lines are stored tokenized and keyed by line number, so a listing
/// is always sorted and every line renders in canonical form.

#[derive(Debug, Default)]
pub struct Program {
    lines: BTreeMap<LineNumber, Vec<Token>>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Insert a numbered line. The first token must be the line
    /// number; a number with nothing after it deletes the line.
    pub fn insert(&mut self, tokens: &[Token]) -> Result<LineNumber> {
        let line_number = match tokens.first() {
            Some(token) => LineNumber::try_from(token)?,
            None => return Err(error!(InternalError; "EMPTY LINE")),
        };
        let body = &tokens[1..];
        if body.is_empty() {
            self.lines.remove(&line_number);
        } else {
            self.lines.insert(line_number, body.to_vec());
        }
        Ok(line_number)
    }

    pub fn delete(&mut self, line_number: LineNumber) {
        self.lines.remove(&line_number);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_numbers(&self) -> Vec<LineNumber> {
        self.lines.keys().cloned().collect()
    }

    pub fn first_line(&self) -> Option<LineNumber> {
        self.lines.keys().next().cloned()
    }

    /// First stored line strictly after the given number.
    pub fn next_line(&self, after: LineNumber) -> Option<LineNumber> {
        self.lines
            .range((Bound::Excluded(after), Bound::Unbounded))
            .next()
            .map(|(line_number, _)| *line_number)
    }

    pub fn tokens(&self, line_number: LineNumber) -> Option<&[Token]> {
        self.lines.get(&line_number).map(|tokens| tokens.as_slice())
    }

    /// Canonical text of one stored line.
    pub fn render(&self, line_number: LineNumber) -> Option<String> {
        let tokens = self.lines.get(&line_number)?;
        let text = tokens
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        Some(format!("{} {}", line_number, text))
    }

    /// Write the whole listing in line order as canonical text.
    pub fn persist<W: Write>(&self, writer: &mut W) -> Result<()> {
        for line_number in self.line_numbers() {
            if let Some(text) = self.render(line_number) {
                writeln!(writer, "{}", text).map_err(|e| error!(DiskIoError; &e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Replace the listing with lines read as text. On failure the
    /// store holds the lines read so far; the caller decides whether
    /// to keep or clear them.
    pub fn restore<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.clear();
        for line in reader.lines() {
            let line = line.map_err(|e| error!(DiskIoError; &e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let tokens = lex(&line)?;
            self.insert(&tokens)?;
        }
        Ok(())
    }

    /// Run the stored program from its first line.
    pub fn execute(&self, term: &mut dyn Terminal) -> Result<()> {
        Runtime::new(self, term).run()
    }
}
