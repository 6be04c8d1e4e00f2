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

//! Error types for the littlec compiler.
//!
//! Compilation knows exactly two failure classes: fatal compiler
//! diagnostics carrying the source line they were raised on, and I/O
//! failures opening or writing files. The first diagnostic aborts the
//! whole run; there is no error recovery.

use thiserror::Error;

/// A fatal compiler diagnostic.
///
/// Carries the message and the source line the scanner had reached when
/// the diagnostic was raised. Exactly one of these is ever surfaced per
/// compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line})")]
pub struct CompileError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Source line number (1-indexed) at the time of failure.
    pub line: u32,
}

impl CompileError {
    /// Create a new diagnostic.
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Top-level error for the front end.
///
/// Distinguishes I/O failures (the caller may retry with another path)
/// from compiler diagnostics (fatal to the compilation).
#[derive(Debug, Error)]
pub enum Error {
    /// Failure opening, reading or writing a file.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// A compiler diagnostic.
    #[error(transparent)]
    Compile(#[from] CompileError),
}
