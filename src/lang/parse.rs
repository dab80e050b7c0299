use super::ast::*;
use super::token::*;
use super::{Column, Error, LineNumber};
use crate::error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parse the tokens of one line into its colon-separated statements.
/// The index into the returned vector is the statement index the
/// program counter uses.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>> {
    Parser::parse(tokens)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        let mut r: Vec<Statement> = vec![];
        loop {
            match parse.peek() {
                None => return Ok(r),
                Some(Token::Colon) => {
                    parse.next();
                    continue;
                }
                _ => {}
            }
            match parse.statement() {
                Ok(s) => r.push(s),
                Err(e) => return Err(e.in_column(&parse.col)),
            }
            match parse.peek() {
                None | Some(Token::Colon) => {}
                Some(_) => {
                    return Err(error!(SyntaxError; "UNEXPECTED TOKEN").in_column(&parse.col))
                }
            }
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    // Columns track the canonical single-space rendering of the line.
    fn advance(&mut self) -> Option<&'a Token> {
        let t = self.token_stream.next()?;
        let start = if self.col == (0..0) {
            0
        } else {
            self.col.end + 1
        };
        self.col = start..start + t.to_string().chars().count();
        Some(t)
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        self.advance()
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.advance();
        }
        self.peeked
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => Statement::for_word(self, &Word::Let),
            Some(Token::Word(word)) => {
                self.next();
                Statement::for_word(self, word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        self.expr_binary(1)
    }

    fn expr_binary(&mut self, precedence: usize) -> Result<Expression> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Operator(op)) => {
                    if Expression::op_precedence(op) < precedence {
                        break;
                    }
                    op.clone()
                }
                _ => break,
            };
            self.next();
            let column = self.column();
            let op_precedence = Expression::op_precedence(&op);
            // Caret is right-associative, everything else binds left.
            let rhs = if op == Operator::Caret {
                self.expr_binary(op_precedence)?
            } else {
                self.expr_binary(op_precedence + 1)?
            };
            lhs = Expression::for_binary_op(column, &op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Ident(i)) => {
                let ident = i.clone();
                let column = self.column();
                if let Some(Token::LParen) = self.peek() {
                    self.next();
                    let index = self.expression()?;
                    self.expect(Token::RParen)?;
                    return Ok(Expression::Array(column, ident, Box::new(index)));
                }
                Ok(Expression::Var(column, ident))
            }
            Some(Token::Literal(Literal::Number(s))) => {
                let column = self.column();
                Ok(Expression::Number(column, parse_number(s)?))
            }
            Some(Token::Literal(Literal::String(s))) => {
                let column = self.column();
                Ok(Expression::String(column, Rc::from(s.as_str())))
            }
            Some(Token::Operator(Operator::Minus)) => {
                let column = self.column();
                let expr = self.expr_binary(6)?;
                Ok(Expression::Negation(column, Box::new(expr)))
            }
            Some(Token::Operator(Operator::Plus)) => self.primary(),
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    fn printer_list(&mut self) -> Result<Vec<Expression>> {
        let mut v: Vec<Expression> = vec![];
        let mut linefeed = true;
        loop {
            match self.peek() {
                None | Some(Token::Colon) => {
                    if linefeed {
                        let mut column = self.column();
                        column.end = column.start;
                        v.push(Expression::Char(column, '\n'));
                    }
                    return Ok(v);
                }
                Some(Token::Semicolon) => {
                    linefeed = false;
                    self.next();
                }
                Some(Token::Comma) => {
                    linefeed = false;
                    self.next();
                    v.push(Expression::Char(self.column(), '\t'));
                }
                _ => {
                    linefeed = true;
                    v.push(self.expression()?);
                }
            }
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        match self.next() {
            Some(Token::Ident(i)) => Ok(i.clone()),
            _ => Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let ident = self.ident()?;
        let column = self.column();
        if let Some(Token::LParen) = self.peek() {
            self.next();
            let index = self.expression()?;
            self.expect(Token::RParen)?;
            return Ok(Variable::Array(column, ident, Box::new(index)));
        }
        Ok(Variable::Unary(column, ident))
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn line_number(&mut self) -> Result<LineNumber> {
        match self.next() {
            Some(token) => {
                if let Token::Literal(_) = token {
                    return LineNumber::try_from(token);
                }
                Err(error!(SyntaxError; "EXPECTED LINE NUMBER"))
            }
            None => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn data_literal(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::Literal(Literal::Number(s))) => {
                Ok(Expression::Number(self.column(), parse_number(s)?))
            }
            Some(Token::Literal(Literal::String(s))) => {
                Ok(Expression::String(self.column(), Rc::from(s.as_str())))
            }
            Some(Token::Operator(Operator::Minus)) => match self.next() {
                Some(Token::Literal(Literal::Number(s))) => {
                    Ok(Expression::Number(self.column(), -parse_number(s)?))
                }
                _ => Err(error!(SyntaxError; "EXPECTED LITERAL")),
            },
            _ => Err(error!(SyntaxError; "EXPECTED LITERAL")),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Literal(_) => "EXPECTED LITERAL",
                Word(_) => "EXPECTED RESERVED WORD",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                Remark(_) => "UNEXPECTED TOKEN",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Colon => "EXPECTED COLON",
                Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }
}

fn parse_number(s: &str) -> Result<f64> {
    match s.parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(error!(SyntaxError; "MALFORMED NUMBER")),
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let lhs = Box::new(lhs);
        let rhs = Box::new(rhs);
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Or => 1,
            And => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 3,
            Plus | Minus => 4,
            Multiply | Divide => 5,
            Caret => 7,
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Clear => Ok(Statement::Clear(column)),
            Cursor => Self::r#cursor(parse, column),
            Data => Self::r#data(parse, column),
            Dim => Self::r#dim(parse, column),
            End => Ok(Statement::End(column)),
            For => Self::r#for(parse, column),
            Get => Ok(Statement::Get(column, parse.variable()?)),
            Gosub => Ok(Statement::Gosub(column, parse.line_number()?)),
            Goto => Ok(Statement::Goto(column, parse.line_number()?)),
            Home => Ok(Statement::Home(column)),
            If => Self::r#if(parse, column),
            Input => Self::r#input(parse, column),
            Let => Self::r#let(parse, column),
            Next => Self::r#next(parse, column),
            Poll => Ok(Statement::Poll(column, parse.variable()?)),
            Print => Ok(Statement::Print(column, parse.printer_list()?)),
            Read => Ok(Statement::Read(column, parse.variable_list()?)),
            Rem => Self::r#rem(parse, column),
            Return => Ok(Statement::Return(column)),
            Stop => Ok(Statement::Stop(column)),
            Exit | List | Load | New | Run | Save => {
                Err(error!(SyntaxError; "NOT A PROGRAM STATEMENT"))
            }
            Step | Then | To => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn r#cursor(parse: &mut Parser, column: Column) -> Result<Statement> {
        let col_expr = parse.expression()?;
        parse.expect(Token::Comma)?;
        let row_expr = parse.expression()?;
        Ok(Statement::Cursor(column, col_expr, row_expr))
    }

    fn r#data(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut v = vec![parse.data_literal()?];
        while let Some(Token::Comma) = parse.peek() {
            parse.next();
            v.push(parse.data_literal()?);
        }
        Ok(Statement::Data(column, v))
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::LParen)?;
        let size = parse.expression()?;
        parse.expect(Token::RParen)?;
        Ok(Statement::Dim(column, ident, size))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let predicate = parse.expression()?;
        parse.expect(Token::Word(Word::Then))?;
        let then = match parse.peek() {
            Some(Token::Literal(_)) => ThenDo::Line(parse.line_number()?),
            _ => ThenDo::Statement(Box::new(parse.statement()?)),
        };
        Ok(Statement::If(column, predicate, then))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut prompt = None;
        if let Some(Token::Literal(Literal::String(_))) = parse.peek() {
            if let Some(Token::Literal(Literal::String(s))) = parse.next() {
                prompt = Some(Rc::from(s.as_str()));
            }
            match parse.next() {
                Some(Token::Semicolon) | Some(Token::Comma) => {}
                _ => return Err(error!(SyntaxError; "EXPECTED SEPARATOR")),
            }
        }
        Ok(Statement::Input(column, prompt, parse.variable_list()?))
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let variable = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Let(column, variable, expr))
    }

    fn r#next(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = match parse.peek() {
            Some(Token::Ident(i)) => {
                let i = i.clone();
                parse.next();
                Some(i)
            }
            _ => None,
        };
        Ok(Statement::Next(column, ident))
    }

    fn r#rem(parse: &mut Parser, column: Column) -> Result<Statement> {
        if let Some(Token::Remark(_)) = parse.peek() {
            parse.next();
        }
        Ok(Statement::Rem(column))
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex;
    use super::*;

    fn parse_str(s: &str) -> Statement {
        let tokens = lex(s).unwrap();
        let mut v = parse(&tokens).unwrap();
        assert_eq!(v.len(), 1);
        v.pop().unwrap()
    }

    #[test]
    fn test_let_statement() {
        let answer = Statement::Let(
            0..0,
            Variable::Unary(0..1, Ident::Plain(Rc::from("A"))),
            Expression::Number(4..6, 12.0),
        );
        assert_eq!(parse_str("A = 12"), answer);
    }

    #[test]
    fn test_greedy_keyword_let() {
        // LETTER=BAR lexes as LET TER = BAR
        let answer = Statement::Let(
            0..3,
            Variable::Unary(4..7, Ident::Plain(Rc::from("TER"))),
            Expression::Var(10..13, Ident::Plain(Rc::from("BAR"))),
        );
        assert_eq!(parse_str("letter=bar"), answer);
    }

    #[test]
    fn test_precedence_and_paren() {
        let stmt = parse_str("A=2-(3+1)*4");
        match stmt {
            Statement::Let(_, _, Expression::Subtract(_, _, rhs)) => match *rhs {
                Expression::Multiply(..) => {}
                other => panic!("expected multiply, got {:?}", other),
            },
            other => panic!("expected subtract, got {:?}", other),
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        let stmt = parse_str("A=2^3^2");
        match stmt {
            Statement::Let(_, _, Expression::Power(_, lhs, _)) => match *lhs {
                Expression::Number(_, n) => assert_eq!(n, 2.0),
                other => panic!("expected number, got {:?}", other),
            },
            other => panic!("expected power, got {:?}", other),
        }
    }

    #[test]
    fn test_if_then_line_number() {
        let stmt = parse_str("IF X > 2 THEN 100");
        match stmt {
            Statement::If(_, _, ThenDo::Line(100)) => {}
            other => panic!("expected jump target, got {:?}", other),
        }
    }

    #[test]
    fn test_if_then_inline_statement() {
        let stmt = parse_str("IF X THEN PRINT X");
        match stmt {
            Statement::If(_, _, ThenDo::Statement(s)) => match *s {
                Statement::Print(..) => {}
                other => panic!("expected print, got {:?}", other),
            },
            other => panic!("expected inline statement, got {:?}", other),
        }
    }

    #[test]
    fn test_colon_splits_statements() {
        let tokens = lex("PRINT 1: PRINT 2").unwrap();
        let v = parse(&tokens).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_trailing_junk_is_rejected() {
        let tokens = lex("GOTO 10 20").unwrap();
        assert!(parse(&tokens).is_err());
    }

    #[test]
    fn test_for_with_step() {
        let stmt = parse_str("FOR I = 1 TO 9 STEP 2");
        match stmt {
            Statement::For(_, _, _, _, Some(_)) => {}
            other => panic!("expected step, got {:?}", other),
        }
    }
}
