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

//! Symbol and literal tables plus the parser's bookkeeping records.
//!
//! Both tables are insertion-ordered name-to-entry maps populated lazily
//! on first sighting of a lexeme. A [`Symbol`] is the one mutable shared
//! entity of a compilation: every site that mentions a name refers to the
//! same entry, addressed by a cheap [`SymbolId`] into the table's arena.

use std::collections::HashMap;
use std::num::ParseIntError;

/// What the parser has learned a symbol to be.
///
/// Every symbol starts [`SymbolKind::Unknown`] and is refined in place as
/// declarations and references are seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Declared with `const`; assignment to it is an error.
    Constant,
    /// Declared with `var`.
    Variable,
    /// Declared with `var name[size]`.
    Array,
    /// Defined with `proc`.
    Procedure,
    /// Called before its `proc` definition has been seen.
    ForwardProc,
    /// The name following `program`.
    ProgramName,
    /// Sighted but not yet classified.
    Unknown,
}

impl SymbolKind {
    /// Table-dump label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            SymbolKind::Constant => "CONST_TYPE",
            SymbolKind::Variable => "VAR_TYPE",
            SymbolKind::Array => "ARRAY_TYPE",
            SymbolKind::Procedure => "PROC_TYPE",
            SymbolKind::ForwardProc => "FORWARD_PROC",
            SymbolKind::ProgramName => "PROGRAM_NAME",
            SymbolKind::Unknown => "UNKNOWN_TYPE",
        }
    }
}

/// One named entity: a local-storage slot or a code address, once known.
///
/// `address` is assigned exactly once; the parser diagnoses a second
/// assignment attempt as a redefinition before ever reaching this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The (lowercased) name.
    pub lexeme: String,
    /// Local slot number for constants/variables/arrays, code address for
    /// procedures. `None` until the defining declaration is seen.
    pub address: Option<i32>,
    /// Current classification.
    pub kind: SymbolKind,
}

/// Handle to a [`Symbol`] in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolId(usize);

/// Insertion-ordered symbol table.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a name up, creating an unknown/unassigned entry on first
    /// sighting.
    pub fn intern(&mut self, lexeme: &str) -> SymbolId {
        if let Some(&slot) = self.index.get(lexeme) {
            return SymbolId(slot);
        }
        let slot = self.entries.len();
        self.entries.push(Symbol {
            lexeme: lexeme.to_string(),
            address: None,
            kind: SymbolKind::Unknown,
        });
        self.index.insert(lexeme.to_string(), slot);
        SymbolId(slot)
    }

    /// Look a name up without creating it.
    pub fn lookup(&self, lexeme: &str) -> Option<SymbolId> {
        self.index.get(lexeme).map(|&slot| SymbolId(slot))
    }

    /// Shared access to a symbol.
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.entries[id.0]
    }

    /// Exclusive access to a symbol.
    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.entries[id.0]
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }
}

/// A numeric literal: the normalized base-10 lexeme and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Base-10 text as produced by the scanner.
    pub lexeme: String,
    /// Value parsed once at creation.
    pub value: i32,
}

/// Insertion-ordered literal table.
#[derive(Debug, Default)]
pub struct LiteralTable {
    entries: Vec<Literal>,
    index: HashMap<String, usize>,
}

impl LiteralTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a lexeme up, parsing and recording its value on first
    /// sighting. Fails if the decimal text does not fit an `i32`.
    pub fn intern(&mut self, lexeme: &str) -> Result<i32, ParseIntError> {
        if let Some(&slot) = self.index.get(lexeme) {
            return Ok(self.entries[slot].value);
        }
        let value: i32 = lexeme.parse()?;
        self.index.insert(lexeme.to_string(), self.entries.len());
        self.entries.push(Literal {
            lexeme: lexeme.to_string(),
            value,
        });
        Ok(value)
    }

    /// Value of an already-interned lexeme.
    pub fn value_of(&self, lexeme: &str) -> Option<i32> {
        self.index.get(lexeme).map(|&slot| self.entries[slot].value)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.entries.iter()
    }
}

/// A branch or call whose target address was not yet known when the
/// instruction was emitted.
///
/// `at` is the offset of the instruction opcode in the output buffer; the
/// two bytes after it are patched with `target_address - at` once the
/// symbol's address is known.
#[derive(Debug, Clone, Copy)]
pub struct ForwardReference {
    /// Offset of the referencing instruction in the output buffer.
    pub at: i32,
    /// The symbol whose address must be filled in.
    pub target: SymbolId,
}

/// Kind of an open control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    If,
    Else,
    While,
    Proc,
    Program,
}

/// One open control block on the structure stack.
///
/// Pushed when the block opens, popped when its closing keyword is seen;
/// stack depth equals the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct Structure {
    /// Block kind, validated against the closing keyword.
    pub kind: StructKind,
    /// Address of the start of a loop's condition re-check.
    pub condition_addr: i32,
    /// Address of the branch instruction back-patched at block close.
    pub patch_addr: i32,
}

impl Structure {
    /// Open a new block of the given kind.
    pub fn new(kind: StructKind) -> Self {
        Self {
            kind,
            condition_addr: 0,
            patch_addr: 0,
        }
    }
}
