// littlec - A single-pass, table-driven compiler for the LITTLE teaching language
// Copyright (C) 2026  The littlec authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Scanner module for the littlec compiler.
//!
//! Turns LITTLE source text into a stream of [`Token`]s. It handles:
//! - Reserved words and user symbols (case-folded to lowercase)
//! - Numeric literals in decimal, octal (leading `0`) and hex (`0x`),
//!   always normalized to base-10 lexemes
//! - Quoted single-character literals (`'c'` becomes the ASCII code)
//! - Line (`//`) and block (`/* */`) comments
//! - One- and two-character operators via a fixed lookup table
//!
//! Newlines advance the [`Session`] line counter used for diagnostics.

mod token;

pub use token::{Token, TokenKind};

use std::collections::HashMap;

use crate::error::Result;
use crate::session::Session;

/// The scanner state over one source text.
pub struct Scanner<'src> {
    src: &'src [u8],
    pos: usize,
    operators: HashMap<&'static str, TokenKind>,
}

/// Build the reserved-word/operator lookup table.
///
/// Reserved words and punctuation share one table: identifier scanning
/// consults it to distinguish keywords from user symbols, and operator
/// scanning consults it to classify lexemes.
fn operator_table() -> HashMap<&'static str, TokenKind> {
    let mut table = HashMap::new();
    table.insert("+", TokenKind::AddOp);
    table.insert("-", TokenKind::AddOp);
    table.insert("*", TokenKind::MultOp);
    table.insert("/", TokenKind::MultOp);
    table.insert("(", TokenKind::LParen);
    table.insert(")", TokenKind::RParen);
    table.insert("[", TokenKind::LBracket);
    table.insert("]", TokenKind::RBracket);
    table.insert(";", TokenKind::Semicolon);
    table.insert("<", TokenKind::RelOp);
    table.insert("<=", TokenKind::RelOp);
    table.insert("=", TokenKind::RelOp);
    table.insert(">=", TokenKind::RelOp);
    table.insert(">", TokenKind::RelOp);
    table.insert("!=", TokenKind::RelOp);
    table.insert(",", TokenKind::Comma);
    table.insert(":=", TokenKind::Assign);
    table.insert("call", TokenKind::Call);
    table.insert("else", TokenKind::Else);
    table.insert("endif", TokenKind::End);
    table.insert("endproc", TokenKind::End);
    table.insert("endprogram", TokenKind::End);
    table.insert("endwhile", TokenKind::End);
    table.insert("if", TokenKind::IfWhile);
    table.insert("while", TokenKind::IfWhile);
    table.insert("proc", TokenKind::Proc);
    table.insert("then", TokenKind::ThenDo);
    table.insert("do", TokenKind::ThenDo);
    table.insert("write", TokenKind::Write);
    table.insert("program", TokenKind::Program);
    table.insert("const", TokenKind::Const);
    table.insert("var", TokenKind::Var);
    table.insert("{", TokenKind::LBrace);
    table.insert("}", TokenKind::RBrace);
    table
}

impl<'src> Scanner<'src> {
    /// Create a scanner over the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            operators: operator_table(),
        }
    }

    /// Peek at the next byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    /// Consume and return the next byte.
    fn read(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Return the next token, consuming it.
    ///
    /// At end of input this returns an [`TokenKind::EndFile`] token and
    /// keeps returning it on subsequent calls.
    pub fn next_token(&mut self, session: &mut Session) -> Result<Token> {
        loop {
            let c = match self.read() {
                Some(c) => c,
                None => return Ok(Token::new(TokenKind::EndFile, "")),
            };

            if c.is_ascii_whitespace() {
                if c == b'\n' {
                    session.bump_line();
                }
                continue;
            }

            if c.is_ascii_alphabetic() {
                return Ok(self.read_name(c));
            }

            if c.is_ascii_digit() {
                return self.read_literal(c, session);
            }

            if c == b'\'' {
                // Quoted character: the lexeme is the ASCII code in decimal.
                let code = match self.read() {
                    Some(code) => code,
                    None => return Err(session.error("Invalid literal")),
                };
                self.read(); // closing apostrophe
                return Ok(Token::new(TokenKind::Literal, code.to_string()));
            }

            if c == b'/' {
                match self.peek() {
                    Some(b'/') => {
                        // Line comment: skip to the end of the line.
                        while let Some(skipped) = self.read() {
                            if skipped == b'\n' {
                                session.bump_line();
                                break;
                            }
                        }
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_block_comment(session);
                        continue;
                    }
                    _ => return self.operator_token("/", session),
                }
            }

            // Any character directly followed by `=` forms a two-character
            // operator lexeme; unknown pairs are illegal.
            if self.peek() == Some(b'=') {
                self.read();
                let lexeme = format!("{}=", c as char);
                return self.operator_token(&lexeme, session);
            }

            let lexeme = (c as char).to_string();
            return self.operator_token(&lexeme, session);
        }
    }

    /// Skip a `/* */` comment, counting newlines. An unterminated comment
    /// simply runs to end of input.
    fn skip_block_comment(&mut self, session: &mut Session) {
        let mut prev = 0u8;
        while let Some(c) = self.read() {
            if c == b'\n' {
                session.bump_line();
            } else if c == b'/' && prev == b'*' {
                return;
            }
            prev = c;
        }
    }

    /// Scan a letter-initiated name, folding to lowercase, and classify it
    /// as a reserved word or a user symbol.
    fn read_name(&mut self, first: u8) -> Token {
        let mut name = String::new();
        name.push(first.to_ascii_lowercase() as char);
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.pos += 1;
            name.push(c.to_ascii_lowercase() as char);
        }

        match self.operators.get(name.as_str()) {
            Some(&kind) => Token::new(kind, name),
            None => Token::new(TokenKind::Symbol, name),
        }
    }

    /// Scan a digit-initiated numeric literal.
    ///
    /// A leading `0x`/`0X` selects hex, a lone leading `0` selects octal,
    /// anything else is decimal. The resulting lexeme is always the base-10
    /// string of the value; conversion happens here, digit by digit.
    fn read_literal(&mut self, first: u8, session: &mut Session) -> Result<Token> {
        let mut digits = String::new();
        let base = if first == b'0' && matches!(self.peek(), Some(b'x') | Some(b'X')) {
            self.pos += 1;
            16
        } else if first == b'0' {
            8
        } else {
            digits.push(first as char);
            10
        };

        // Collect hex letters for every base; an out-of-range digit is
        // diagnosed during conversion below.
        while let Some(c) = self.peek() {
            if !c.is_ascii_hexdigit() {
                break;
            }
            self.pos += 1;
            digits.push(c as char);
        }

        let lexeme = match base {
            8 => {
                let mut value: i32 = 0;
                for digit in digits.chars() {
                    match digit.to_digit(10) {
                        Some(d) if d < 8 => {
                            value = value.wrapping_mul(8).wrapping_add(d as i32);
                        }
                        _ => return Err(session.error("Invalid literal")),
                    }
                }
                value.to_string()
            }
            16 => {
                let mut value: i32 = 0;
                for digit in digits.chars() {
                    match digit.to_digit(16) {
                        Some(d) => value = value.wrapping_mul(16).wrapping_add(d as i32),
                        None => return Err(session.error("Invalid literal")),
                    }
                }
                value.to_string()
            }
            _ => {
                if digits.chars().any(|digit| !digit.is_ascii_digit()) {
                    return Err(session.error("Invalid literal"));
                }
                digits
            }
        };

        Ok(Token::new(TokenKind::Literal, lexeme))
    }

    /// Classify an operator lexeme via the lookup table.
    fn operator_token(&mut self, lexeme: &str, session: &mut Session) -> Result<Token> {
        match self.operators.get(lexeme) {
            Some(&kind) => Ok(Token::new(kind, lexeme)),
            None => Err(session.error("Illegal operator")),
        }
    }
}
