pub use super::ident::Ident;
use super::{Error, LineNumber, MAX_LINE};
use crate::error;
use std::collections::HashMap;
use std::convert::TryFrom;

thread_local!(
    static STRING_TO_TOKEN: HashMap<String, Token> = reserved_words()
        .iter()
        .map(|t| (t.to_string(), t.clone()))
        .collect();
);

fn reserved_words() -> Vec<Token> {
    use Operator::*;
    use Word::*;
    let words = [
        Clear, Cursor, Data, Dim, End, Exit, For, Get, Gosub, Goto, Home, If, Input, Let, List,
        Load, New, Next, Poll, Print, Read, Rem, Return, Run, Save, Step, Stop, Then, To,
    ];
    words
        .iter()
        .map(|w| Token::Word(w.clone()))
        .chain(vec![Token::Operator(And), Token::Operator(Or)])
        .collect()
}

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    Remark(String),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
}

impl Token {
    /// Exact match against the reserved word table. Callers pass
    /// uppercased text; keywords are recognized case-insensitively.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Remark(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Number(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<LineNumber>() {
                    if line >= 1 && line <= MAX_LINE {
                        return Ok(line);
                    }
                }
                return Err(error!(Overflow; msg));
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    Clear,
    Cursor,
    Data,
    Dim,
    End,
    Exit,
    For,
    Get,
    Gosub,
    Goto,
    Home,
    If,
    Input,
    Let,
    List,
    Load,
    New,
    Next,
    Poll,
    Print,
    Read,
    Rem,
    Return,
    Run,
    Save,
    Step,
    Stop,
    Then,
    To,
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Clear => write!(f, "CLEAR"),
            Cursor => write!(f, "CURSOR"),
            Data => write!(f, "DATA"),
            Dim => write!(f, "DIM"),
            End => write!(f, "END"),
            Exit => write!(f, "EXIT"),
            For => write!(f, "FOR"),
            Get => write!(f, "GET"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            Home => write!(f, "HOME"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            New => write!(f, "NEW"),
            Next => write!(f, "NEXT"),
            Poll => write!(f, "POLL"),
            Print => write!(f, "PRINT"),
            Read => write!(f, "READ"),
            Rem => write!(f, "REM"),
            Return => write!(f, "RETURN"),
            Run => write!(f, "RUN"),
            Save => write!(f, "SAVE"),
            Step => write!(f, "STEP"),
            Stop => write!(f, "STOP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let t = Token::from_string("REM");
        assert_eq!(t, Some(Token::Word(Word::Rem)));
        let t = Token::from_string("AND");
        assert_eq!(t, Some(Token::Operator(Operator::And)));
        let t = Token::from_string("PICKLES");
        assert_eq!(t, None);
    }

    #[test]
    fn test_line_number_from_token() {
        use std::convert::TryFrom;
        let t = Token::Literal(Literal::Number("10".to_string()));
        assert_eq!(LineNumber::try_from(&t), Ok(10));
        let t = Token::Literal(Literal::Number("0".to_string()));
        assert!(LineNumber::try_from(&t).is_err());
        let t = Token::Literal(Literal::Number("1.5".to_string()));
        assert!(LineNumber::try_from(&t).is_err());
        let t = Token::Literal(Literal::Number("99999".to_string()));
        assert!(LineNumber::try_from(&t).is_err());
    }
}
