use super::token::*;
use super::Error;
use crate::error;
use std::rc::Rc;

/// Tokenize one line of source text. Total over any input: every
/// failure names the offending column.
pub fn lex(s: &str) -> Result<Vec<Token>, Error> {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    pos: usize,
    remark: bool,
}

impl<'a> BasicLexer<'a> {
    fn lex(s: &str) -> Result<Vec<Token>, Error> {
        let lexer = BasicLexer {
            chars: s.trim_end().chars().peekable(),
            pos: 0,
            remark: false,
        };
        lexer.collect()
    }

    fn take(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn number(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        let mut s = String::new();
        let mut digits = 0;
        let mut decimals = 0;
        loop {
            match self.chars.peek() {
                Some(c) if is_basic_digit(*c) => digits += 1,
                Some('.') => decimals += 1,
                _ => break,
            }
            if let Some(c) = self.take() {
                s.push(c);
            }
        }
        if digits == 0 || decimals > 1 {
            return Err(error!(SyntaxError, ..&(start..self.pos); "MALFORMED NUMBER"));
        }
        Ok(Token::Literal(Literal::Number(s)))
    }

    fn string(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        self.take();
        let mut s = String::new();
        loop {
            match self.take() {
                Some('"') => return Ok(Token::Literal(Literal::String(s))),
                Some(c) => s.push(c),
                None => return Err(error!(UnterminatedString, ..&(start..self.pos))),
            }
        }
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        loop {
            let ch = match self.take() {
                Some(ch) => ch.to_ascii_uppercase(),
                None => break,
            };
            s.push(ch);
            if let Some(token) = Token::from_string(&s) {
                if token == Token::Word(Word::Rem) {
                    self.remark = true;
                }
                return token;
            }
            if ch == '$' {
                return Token::Ident(Ident::String(Rc::from(s)));
            }
            match self.chars.peek() {
                Some(pk) if is_basic_alphabetic(*pk) || is_basic_digit(*pk) || *pk == '$' => {}
                _ => break,
            }
        }
        Token::Ident(Ident::Plain(Rc::from(s)))
    }

    fn remark(&mut self) -> Option<Token> {
        loop {
            match self.chars.peek() {
                Some(c) if is_basic_whitespace(*c) => {
                    self.take();
                }
                _ => break,
            }
        }
        let mut s = String::new();
        while let Some(c) = self.take() {
            s.push(c);
        }
        let s = s.trim_end();
        if s.is_empty() {
            None
        } else {
            Some(Token::Remark(s.to_string()))
        }
    }

    fn punctuation(&mut self) -> Result<Token, Error> {
        use Operator::*;
        let start = self.pos;
        let ch = match self.take() {
            Some(ch) => ch,
            None => return Err(error!(InternalError, ..&(start..start))),
        };
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            '^' => Token::Operator(Caret),
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '+' => Token::Operator(Plus),
            '-' => Token::Operator(Minus),
            '=' => Token::Operator(Equal),
            '<' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(LessEqual)
                }
                Some('>') => {
                    self.take();
                    Token::Operator(NotEqual)
                }
                _ => Token::Operator(Less),
            },
            '>' => match self.chars.peek() {
                Some('=') => {
                    self.take();
                    Token::Operator(GreaterEqual)
                }
                _ => Token::Operator(Greater),
            },
            _ => {
                return Err(
                    error!(IllegalCharacter, ..&(start..self.pos); &ch.to_string()),
                )
            }
        };
        Ok(token)
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remark {
            return self.remark().map(Ok);
        }
        loop {
            match self.chars.peek() {
                Some(c) if is_basic_whitespace(*c) => {
                    self.take();
                }
                _ => break,
            }
        }
        let pk = *self.chars.peek()?;
        if is_basic_digit(pk) || pk == '.' {
            return Some(self.number());
        }
        if is_basic_alphabetic(pk) {
            return Some(Ok(self.alphabetic()));
        }
        if pk == '"' {
            return Some(self.string());
        }
        Some(self.punctuation())
    }
}
