#![allow(dead_code)]

use basic::error;
use basic::lang::{lex, Error};
use basic::mach::Program;
use basic::term::Terminal;
use std::collections::VecDeque;

/// Scripted terminal. Everything written lands in `output`, including
/// echoed prompts and input, so a whole session asserts as one string.
pub struct TestTerm {
    pub output: String,
    input: VecDeque<String>,
    keys: VecDeque<u32>,
    break_at: Option<usize>,
}

impl TestTerm {
    pub fn new() -> TestTerm {
        TestTerm {
            output: String::new(),
            input: VecDeque::new(),
            keys: VecDeque::new(),
            break_at: None,
        }
    }

    pub fn with_input(lines: &[&str]) -> TestTerm {
        let mut term = TestTerm::new();
        term.input = lines.iter().map(|s| s.to_string()).collect();
        term
    }

    pub fn with_keys(keys: &[u32]) -> TestTerm {
        let mut term = TestTerm::new();
        term.keys = keys.iter().cloned().collect();
        term
    }

    /// Request a break after the given number of interrupt polls.
    pub fn break_after(&mut self, polls: usize) {
        self.break_at = Some(polls);
    }
}

impl Terminal for TestTerm {
    fn write(&mut self, text: &str) -> Result<(), Error> {
        self.output.push_str(text);
        Ok(())
    }

    fn newline(&mut self) -> Result<(), Error> {
        self.output.push('\n');
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        self.output.push_str(prompt);
        match self.input.pop_front() {
            Some(line) => {
                self.output.push_str(&line);
                self.output.push('\n');
                Ok(line)
            }
            None => Err(error!(InternalError; "OUT OF TEST INPUT")),
        }
    }

    fn read_char(&mut self) -> Result<u32, Error> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => Err(error!(InternalError; "OUT OF TEST KEYS")),
        }
    }

    fn poll_char(&mut self) -> Option<u32> {
        self.keys.pop_front()
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.output.clear();
        Ok(())
    }

    fn home(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn cursor(&mut self, _column: usize, _row: usize) -> Result<(), Error> {
        Ok(())
    }

    fn interrupted(&mut self) -> bool {
        match self.break_at {
            Some(0) => true,
            Some(polls) => {
                self.break_at = Some(polls - 1);
                false
            }
            None => false,
        }
    }
}

pub fn program(lines: &[&str]) -> Program {
    let mut program = Program::new();
    for line in lines {
        program.insert(&lex(line).unwrap()).unwrap();
    }
    program
}

pub fn run(lines: &[&str]) -> String {
    let mut term = TestTerm::new();
    program(lines).execute(&mut term).unwrap();
    term.output
}

pub fn run_err(lines: &[&str]) -> Error {
    let mut term = TestTerm::new();
    program(lines).execute(&mut term).unwrap_err()
}

pub fn run_with_input(lines: &[&str], input: &[&str]) -> String {
    let mut term = TestTerm::with_input(input);
    program(lines).execute(&mut term).unwrap();
    term.output
}
