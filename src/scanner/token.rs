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

//! Token definitions for the LITTLE language.

/// The lexical category of a token.
///
/// Several reserved words share one category because the dispatch table
/// treats them identically (`endif`/`endproc`/`endprogram`/`endwhile` are
/// all [`TokenKind::End`]; `if`/`while` are both [`TokenKind::IfWhile`];
/// `then`/`do` are both [`TokenKind::ThenDo`]). The token's lexeme
/// disambiguates where it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `+` and `-`.
    AddOp,
    /// `*` and `/`.
    MultOp,
    /// `(`.
    LParen,
    /// `)`.
    RParen,
    /// `[`.
    LBracket,
    /// `]`.
    RBracket,
    /// `;`.
    Semicolon,
    /// `<`, `<=`, `=`, `>=`, `>`, `!=`.
    RelOp,
    /// `,`.
    Comma,
    /// `:=`.
    Assign,
    /// `call`.
    Call,
    /// `else`.
    Else,
    /// `endif`, `endproc`, `endprogram`, `endwhile`.
    End,
    /// `if`, `while`.
    IfWhile,
    /// `proc`.
    Proc,
    /// `then`, `do`.
    ThenDo,
    /// `write`.
    Write,
    /// End of input.
    EndFile,
    /// `program`.
    Program,
    /// `const`.
    Const,
    /// `var`.
    Var,
    /// `{`.
    LBrace,
    /// `}`.
    RBrace,
    /// Numeric literal; the lexeme is always base-10 text.
    Literal,
    /// User-defined name.
    Symbol,
    /// Placeholder before the first token has been read.
    NoToken,
}

/// One lexical unit: a category plus the text it was scanned from.
///
/// Tokens are immutable once produced and copied by value as the parser
/// shifts its window (with one deliberate exception: the parser rewrites
/// an assignment-target `[` lexeme to the sentinel `"[["`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Literal text of the token.
    pub lexeme: String,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// The empty placeholder token.
    pub fn none() -> Self {
        Self::new(TokenKind::NoToken, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_token() {
        let token = Token::none();
        assert_eq!(token.kind, TokenKind::NoToken);
        assert!(token.lexeme.is_empty());
    }

    #[test]
    fn test_token_equality() {
        assert_eq!(
            Token::new(TokenKind::AddOp, "+"),
            Token::new(TokenKind::AddOp, "+")
        );
        assert_ne!(
            Token::new(TokenKind::AddOp, "+"),
            Token::new(TokenKind::AddOp, "-")
        );
    }
}
