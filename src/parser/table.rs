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

//! The CONO dispatch table.
//!
//! The grammar of LITTLE lives in this 17x17 matrix: every pair of
//! adjacent operator tokens selects one code-generation action. Rows are
//! the current operator's category, columns the next operator's, in the
//! fixed order add-op, mult-op, `(`, `)`, `[`, `]`, `;`, rel-op, `,`,
//! `:=`, call, else, end, if/while, proc, then/do, write.

use crate::scanner::TokenKind;

/// A code-generation action selected by the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scalar or array-element assignment.
    Assignment,
    /// Open an `if` or `while` block and compile its condition.
    BeginCondition,
    /// Emit a subroutine call, possibly via forward reference.
    CallProcedure,
    /// Close the innermost block and back-patch its branch.
    EndBlock,
    /// Terminate the current expression.
    EndExpression,
    /// Emit the deferred arithmetic operator.
    EqualOperators,
    /// Emit the deferred operator, then hold the window one iteration.
    GreaterOperators,
    /// Defer entirely to the next window.
    LessOperators,
    /// Legal empty transition.
    NoOp,
    /// Close a parenthesized subexpression.
    Parentheses,
    /// Define a procedure at the current address.
    ProcedureDefinition,
    /// Array subscript: load an element or terminate a store target.
    Subscript,
    /// Compile a `write` statement's expression list.
    Write,
    /// Illegal pair.
    Error,
}

// Two-letter aliases keep the matrix readable.
const AS: Action = Action::Assignment;
const BC: Action = Action::BeginCondition;
const CA: Action = Action::CallProcedure;
const EB: Action = Action::EndBlock;
const EE: Action = Action::EndExpression;
const EQ: Action = Action::EqualOperators;
const GT: Action = Action::GreaterOperators;
const LT: Action = Action::LessOperators;
const NO: Action = Action::NoOp;
const PA: Action = Action::Parentheses;
const PR: Action = Action::ProcedureDefinition;
const SU: Action = Action::Subscript;
const WR: Action = Action::Write;
const XX: Action = Action::Error;

/// `CONO[current][next]` selects the action for an adjacent operator pair.
#[rustfmt::skip]
pub const CONO: [[Action; 17]; 17] = [
    // add-op
    [EQ, LT, LT, GT, LT, GT, GT, GT, GT, XX, XX, XX, XX, XX, XX, GT, XX],
    // mult-op
    [GT, EQ, LT, GT, LT, GT, GT, GT, GT, XX, XX, XX, XX, XX, XX, GT, XX],
    // (
    [LT, LT, LT, PA, LT, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // )
    [XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // [
    [LT, LT, LT, XX, LT, SU, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // ]
    [XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // ;
    [XX, XX, XX, XX, AS, XX, XX, XX, XX, AS, NO, EB, EB, BC, NO, XX, WR],
    // rel-op
    [LT, LT, LT, XX, LT, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX, EE, XX],
    // ,
    [LT, LT, LT, XX, LT, XX, EE, XX, EE, XX, XX, XX, XX, XX, XX, XX, XX],
    // :=
    [LT, LT, LT, XX, LT, XX, EE, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // call
    [XX, XX, XX, XX, XX, XX, CA, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // else
    [XX, XX, XX, XX, AS, XX, XX, XX, XX, AS, NO, XX, EB, BC, XX, XX, WR],
    // end
    [XX, XX, XX, XX, XX, XX, NO, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // if/while
    [LT, LT, LT, XX, LT, XX, XX, EE, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // proc
    [XX, XX, XX, XX, XX, XX, PR, XX, XX, XX, XX, XX, XX, XX, XX, XX, XX],
    // then/do
    [XX, XX, XX, XX, AS, XX, XX, XX, XX, AS, NO, XX, XX, BC, XX, XX, WR],
    // write
    [LT, LT, LT, XX, LT, XX, EE, XX, EE, XX, XX, XX, XX, XX, XX, XX, XX],
];

/// Map a token category to its table index, or `None` for categories the
/// table does not dispatch on (declarations, braces, operands, EOF).
pub fn category_index(kind: TokenKind) -> Option<usize> {
    match kind {
        TokenKind::AddOp => Some(0),
        TokenKind::MultOp => Some(1),
        TokenKind::LParen => Some(2),
        TokenKind::RParen => Some(3),
        TokenKind::LBracket => Some(4),
        TokenKind::RBracket => Some(5),
        TokenKind::Semicolon => Some(6),
        TokenKind::RelOp => Some(7),
        TokenKind::Comma => Some(8),
        TokenKind::Assign => Some(9),
        TokenKind::Call => Some(10),
        TokenKind::Else => Some(11),
        TokenKind::End => Some(12),
        TokenKind::IfWhile => Some(13),
        TokenKind::Proc => Some(14),
        TokenKind::ThenDo => Some(15),
        TokenKind::Write => Some(16),
        _ => None,
    }
}
