//! Recursive-descent parser for expressions.
//!
//! ```text
//! sum      = product { ('+' | '-') product }
//! product  = unary { ('*' | '/') unary | unary }      (juxtaposition multiplies)
//! unary    = ('-' | '+') unary | power
//! power    = primary [ '^' unary ]                   (right-associative)
//! primary  = number | 'x' | constant | function '(' sum ')' | '(' sum ')'
//! ```

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{NumetrifyError, Result};

/// Parser for expression text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire input as one expression.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(NumetrifyError::parse(self.current.column, "empty expression"));
        }

        let expr = self.parse_sum()?;

        if self.current.kind != TokenKind::Eof {
            return Err(NumetrifyError::parse(
                self.current.column,
                format!("unexpected token: {:?}", self.current.text),
            ));
        }

        Ok(expr)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(NumetrifyError::parse(
                self.current.column,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_product()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let rhs = self.parse_product()?;
            lhs = binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_product(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => {
                    self.advance()?;
                    BinaryOp::Mul
                }
                TokenKind::Slash => {
                    self.advance()?;
                    BinaryOp::Div
                }
                // Implicit multiplication: `2x`, `3(x + 1)`, `x sin(x)`
                kind if kind.starts_operand() => BinaryOp::Mul,
                _ => break,
            };
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;

        if self.current.kind == TokenKind::Caret {
            self.advance()?;
            // Exponent may carry its own sign: `2^-x`
            let exponent = self.parse_unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let column = self.current.column;

        match self.current.kind {
            TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                let value = parse_value(&text).ok_or_else(|| {
                    NumetrifyError::parse(column, format!("invalid number: {}", text))
                })?;
                Ok(Expr::Number(value))
            }
            TokenKind::Identifier => {
                let name = self.current.text.clone();
                self.advance()?;
                self.parse_identifier(name, column)
            }
            TokenKind::OpenParen => {
                self.advance()?;
                let inner = self.parse_sum()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(NumetrifyError::parse(column, "unexpected end of expression")),
            _ => Err(NumetrifyError::parse(
                column,
                format!("unexpected token: {:?}", self.current.text),
            )),
        }
    }

    fn parse_identifier(&mut self, name: String, column: usize) -> Result<Expr> {
        if name == "x" || name == "X" {
            return Ok(Expr::Variable);
        }

        if let Some(constant) = Constant::from_name(&name) {
            return Ok(Expr::Constant(constant));
        }

        // `log10` and `log2` lex as a name followed by a number
        let name = if name.eq_ignore_ascii_case("log") && self.current.kind == TokenKind::Number {
            let suffix = self.current.text.clone();
            if suffix == "10" || suffix == "2" {
                self.advance()?;
                format!("log{}", suffix)
            } else {
                name
            }
        } else {
            name
        };

        let func = Function::from_name(&name)
            .ok_or(NumetrifyError::UnknownIdentifier { name, column })?;

        self.expect(TokenKind::OpenParen)?;
        let arg = self.parse_sum()?;
        self.expect(TokenKind::CloseParen)?;

        Ok(Expr::Call {
            func,
            arg: Box::new(arg),
        })
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
