//! Lexer (tokenizer) for expressions.

use crate::error::{NumetrifyError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A name: the variable, a constant or a function
    Identifier,
    /// A decimal number, possibly with an exponent
    Number,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*'
    Star,
    /// '/'
    Slash,
    /// '^' or '**'
    Caret,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether a token of this kind can start an operand.
    ///
    /// Used by the parser to detect implicit multiplication (`2x`, `3(x+1)`).
    pub fn starts_operand(&self) -> bool {
        matches!(self, Self::Identifier | Self::Number | Self::OpenParen)
    }
}

/// Lexer for tokenizing expression text.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek() {
            Some(&(_, ch)) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    column: self.column,
                });
            }
        };

        let column = self.column;
        let single = |kind: TokenKind, text: &str| Token {
            kind,
            text: text.to_string(),
            column,
        };

        let token = match ch {
            '+' => {
                self.advance();
                single(TokenKind::Plus, "+")
            }
            '-' => {
                self.advance();
                single(TokenKind::Minus, "-")
            }
            '*' => {
                self.advance();
                // Python-style power operator
                if let Some(&(_, '*')) = self.chars.peek() {
                    self.advance();
                    single(TokenKind::Caret, "**")
                } else {
                    single(TokenKind::Star, "*")
                }
            }
            '/' => {
                self.advance();
                single(TokenKind::Slash, "/")
            }
            '^' => {
                self.advance();
                single(TokenKind::Caret, "^")
            }
            '(' => {
                self.advance();
                single(TokenKind::OpenParen, "(")
            }
            ')' => {
                self.advance();
                single(TokenKind::CloseParen, ")")
            }
            '0'..='9' | '.' => {
                let text = self.read_number();
                if text == "." {
                    return Err(NumetrifyError::lexer(column, "expected digits after '.'"));
                }
                Token {
                    kind: TokenKind::Number,
                    text,
                    column,
                }
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Token {
                    kind: TokenKind::Identifier,
                    text,
                    column,
                }
            }
            _ => {
                return Err(NumetrifyError::lexer(
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            // Digits stay out of names so that `x2` lexes as `x` `2`
            if ch.is_alphabetic() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Integer part
        self.read_digits(&mut text);

        // Decimal part
        if let Some(&(_, '.')) = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part, only when digits follow so that `2e` stays `2 * e`
        if self.exponent_follows() {
            if let Some(e) = self.advance() {
                text.push(e);
            }
            if let Some(&(_, sign)) = self.chars.peek() {
                if sign == '-' || sign == '+' {
                    text.push(sign);
                    self.advance();
                }
            }
            self.read_digits(&mut text);
        }

        text
    }

    fn exponent_follows(&mut self) -> bool {
        let Some(&(pos, ch)) = self.chars.peek() else {
            return false;
        };
        if ch != 'e' && ch != 'E' {
            return false;
        }
        let mut rest = self.input[pos + ch.len_utf8()..].chars();
        match rest.next() {
            Some(d) if d.is_ascii_digit() => true,
            Some('+' | '-') => matches!(rest.next(), Some(d) if d.is_ascii_digit()),
            _ => false,
        }
    }
}

/// Parse the text of a number token.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
