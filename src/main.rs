use ansi_term::Style;
use basic::error;
use basic::lang::token::{Literal, Operator, Token, Word};
use basic::lang::{lex, Error, LineNumber, MAX_LINE};
use basic::mach::{Program, Runtime};
use basic::term::{Console, Terminal};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, ErrorKind};

type Result<T> = std::result::Result<T, Error>;

fn main() {
    let mut console = match Console::new() {
        Ok(console) => console,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };
    if let Err(error) = main_loop(&mut console) {
        eprintln!("{}", error);
    }
}

fn main_loop(console: &mut Console) -> Result<()> {
    let mut program = Program::new();
    console.print("MICRO BASIC")?;
    console.print("READY.")?;
    loop {
        console.reset_interrupt();
        let line = match console.read_command() {
            Ok(line) => line,
            Err(error) if error.is_break() => {
                console.newline()?;
                continue;
            }
            // End of input.
            Err(_) => return Ok(()),
        };
        let tokens = match lex(&line) {
            Ok(tokens) => tokens,
            Err(error) => {
                report(console, &error)?;
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }
        match command(console, &mut program, &tokens) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(error) => report(console, &error)?,
        }
    }
}

/// Dispatch one entered line. Returns true when the session is over.
fn command(console: &mut Console, program: &mut Program, tokens: &[Token]) -> Result<bool> {
    match &tokens[0] {
        Token::Literal(Literal::Number(_)) => {
            program.insert(tokens)?;
        }
        Token::Word(Word::Exit) => return Ok(true),
        Token::Word(Word::Run) => program.execute(console)?,
        Token::Word(Word::List) => list(console, program, &tokens[1..])?,
        Token::Word(Word::Save) => save(program, &tokens[1..])?,
        Token::Word(Word::Load) => load(program, &tokens[1..])?,
        Token::Word(Word::New) => program.clear(),
        Token::Word(Word::Clear) => console.clear()?,
        _ => Runtime::new(program, console).run_direct(tokens)?,
    }
    Ok(false)
}

fn report(console: &mut Console, error: &Error) -> Result<()> {
    console.print(&format!("{}", Style::new().bold().paint(error.to_string())))
}

fn list(console: &mut Console, program: &Program, args: &[Token]) -> Result<()> {
    let (from, to) = list_range(args)?;
    for line_number in program.line_numbers() {
        if line_number < from || line_number > to {
            continue;
        }
        if let Some(text) = program.render(line_number) {
            console.print(&text)?;
        }
    }
    Ok(())
}

/// LIST, LIST n, LIST n-, LIST -m, LIST n-m.
fn list_range(args: &[Token]) -> Result<(LineNumber, LineNumber)> {
    match args {
        [] => Ok((1, MAX_LINE)),
        [Token::Operator(Operator::Minus), m] => Ok((1, LineNumber::try_from(m)?)),
        [n] => {
            let n = LineNumber::try_from(n)?;
            Ok((n, n))
        }
        [n, Token::Operator(Operator::Minus)] => Ok((LineNumber::try_from(n)?, MAX_LINE)),
        [n, Token::Operator(Operator::Minus), m] => {
            Ok((LineNumber::try_from(n)?, LineNumber::try_from(m)?))
        }
        _ => Err(error!(SyntaxError; "EXPECTED LINE RANGE")),
    }
}

fn save(program: &Program, args: &[Token]) -> Result<()> {
    let filename = filename(args)?;
    if program.is_empty() {
        return Err(error!(InternalError; "NOTHING TO SAVE"));
    }
    let mut file = File::create(&filename).map_err(|e| error!(DiskIoError; &e.to_string()))?;
    program.persist(&mut file)
}

/// A failed LOAD never leaves half a program behind.
fn load(program: &mut Program, args: &[Token]) -> Result<()> {
    let filename = filename(args)?;
    let file = match File::open(&filename) {
        Ok(file) => file,
        Err(error) => {
            let msg = error.to_string();
            return Err(match error.kind() {
                ErrorKind::NotFound => error!(FileNotFound; &msg),
                _ => error!(DiskIoError; &msg),
            });
        }
    };
    if let Err(error) = program.restore(BufReader::new(file)) {
        program.clear();
        return Err(error);
    }
    Ok(())
}

fn filename(args: &[Token]) -> Result<String> {
    match args {
        [Token::Literal(Literal::String(s))] => Ok(s.clone()),
        _ => Err(error!(SyntaxError; "EXPECTED QUOTED FILENAME")),
    }
}
