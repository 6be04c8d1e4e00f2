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

//! Parser module for the littlec compiler.
//!
//! This is a single-pass parser and code generator in one: it slides a
//! two-token window (current operator, next operator) over the source and
//! dispatches through the CONO table to the action that emits bytecode for
//! that operator pair. There is no AST; bytecode is appended to the
//! [`Emitter`] as tokens arrive, with forward references back-patched once
//! their targets are known.
//!
//! # Module Structure
//!
//! - `table` - The CONO dispatch table mapping operator pairs to actions
//! - `actions` - The code generators the table dispatches to (ActionSet trait)
//! - `declarations` - Constant, variable and procedure sections (DeclarationCompiler trait)
//! - `expressions` - Operand pushing and expression/condition compilation (ExpressionCompiler trait)

// Submodules
pub mod actions;
pub mod declarations;
pub mod expressions;
pub mod table;

// Internal imports from submodules
use declarations::DeclarationCompiler;
use table::{category_index, Action, CONO};

use crate::emitter::Emitter;
use crate::error::Result;
use crate::scanner::{Scanner, Token, TokenKind};
use crate::session::Session;
use crate::symtab::{
    ForwardReference, LiteralTable, StructKind, Structure, SymbolId, SymbolKind, SymbolTable,
};

/// Control state of the expression loop.
///
/// `Freeze` holds the token window in place for one more dispatch so an
/// action can re-examine the pair it rewrote; `Exit` unwinds the innermost
/// expression (or, at `endprogram`, the whole compilation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Continue,
    Freeze,
    Exit,
}

/// Compile LITTLE source text into a class-file image.
///
/// This is the crate-internal entry point; [`crate::compile`] wraps it.
pub fn compile(source: &str, session: &mut Session) -> Result<Vec<u8>> {
    Parser::new(source, session).compile()
}

/// The parser state.
///
/// `current` and `next` are always operator tokens; any symbol or literal
/// scanned between them lands in `operand`, with `symbol`/`literal` holding
/// its table entry. The pair drives every CONO dispatch.
pub struct Parser<'a> {
    pub(crate) session: &'a mut Session,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) emitter: Emitter,
    /// Left edge of the dispatch window.
    pub(crate) current: Token,
    /// Right edge of the dispatch window.
    pub(crate) next: Token,
    /// The operand between `current` and `next`, if any.
    pub(crate) operand: Option<Token>,
    /// Symbol-table entry for `operand`, when it is a symbol.
    pub(crate) symbol: Option<SymbolId>,
    /// Numeric value of `operand`, when it is a literal.
    pub(crate) literal: Option<i32>,
    pub(crate) in_expression: bool,
    pub(crate) status: Status,
    /// Next free local-variable slot. Slot 0 is reserved for the return
    /// address saved at procedure entry.
    pub(crate) next_location: i32,
    pub(crate) symbols: SymbolTable,
    pub(crate) literals: LiteralTable,
    pub(crate) operator_stack: Vec<Token>,
    pub(crate) structures: Vec<Structure>,
    pub(crate) forward_refs: Vec<ForwardReference>,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given source text.
    pub fn new(source: &'a str, session: &'a mut Session) -> Self {
        Self {
            session,
            scanner: Scanner::new(source),
            emitter: Emitter::new(),
            current: Token::none(),
            next: Token::none(),
            operand: None,
            symbol: None,
            literal: None,
            in_expression: false,
            status: Status::Continue,
            next_location: 1,
            symbols: SymbolTable::new(),
            literals: LiteralTable::new(),
            operator_stack: Vec::new(),
            structures: Vec::new(),
            forward_refs: Vec::new(),
        }
    }

    /// Run the compilation and return the finished class-file image.
    pub fn compile(mut self) -> Result<Vec<u8>> {
        self.run()?;
        self.finish()
    }

    // ========================================
    // Program Compilation
    // ========================================

    /// Compile the program header, declarations and procedure bodies.
    fn run(&mut self) -> Result<()> {
        self.advance()?;
        self.advance()?;

        // The first three tokens must form `program <name> ;`.
        let program_name = match self.symbol {
            Some(id) if self.current.lexeme == "program" && self.next.lexeme == ";" => id,
            _ => return Err(self.session.error("Illegal program definition")),
        };

        self.symbols.get_mut(program_name).kind = SymbolKind::ProgramName;
        self.structures.push(Structure::new(StructKind::Program));
        self.advance()?;

        if self.next.kind == TokenKind::Const {
            self.compile_constants()?;
        }
        if self.next.kind == TokenKind::Var {
            self.compile_variables()?;
        }
        self.compile_procedures()
    }

    /// Finalize the image and dump the tables to the trace sink.
    fn finish(mut self) -> Result<Vec<u8>> {
        let emitter = std::mem::take(&mut self.emitter);
        let image = emitter.finalize(self.session)?;
        self.dump_tables();
        Ok(image)
    }

    // ========================================
    // Token Window
    // ========================================

    /// Slide the token window one operator to the right.
    ///
    /// A symbol or literal between the operators is captured as the
    /// operand and interned, then the window extends to the operator
    /// after it, so `current` and `next` are operators on every dispatch.
    pub(crate) fn advance(&mut self) -> Result<()> {
        self.current = std::mem::replace(&mut self.next, Token::none());
        let peek = self.scanner.next_token(self.session)?;

        self.operand = None;
        self.symbol = None;
        self.literal = None;

        match peek.kind {
            TokenKind::Symbol => {
                self.symbol = Some(self.symbols.intern(&peek.lexeme));
                self.operand = Some(peek);
                self.next = self.scanner.next_token(self.session)?;
            }
            TokenKind::Literal => {
                let value = match self.literals.intern(&peek.lexeme) {
                    Ok(value) => value,
                    Err(_) => return Err(self.session.error("Invalid literal")),
                };
                self.literal = Some(value);
                self.operand = Some(peek);
                self.next = self.scanner.next_token(self.session)?;
            }
            _ => self.next = peek,
        }

        self.trace_window();
        Ok(())
    }

    /// Write the current window to the trace sink.
    fn trace_window(&mut self) {
        if !self.session.tracing() {
            return;
        }
        let line = self.session.line();
        self.session
            .trace(&format!("Parser - Advance called (line {})", line));
        self.session
            .trace(&format!("   current operator:\t{}", self.current.lexeme));
        if let Some(operand) = &self.operand {
            self.session
                .trace(&format!("   operand:\t\t{}", operand.lexeme));
        }
        self.session
            .trace(&format!("   next operator:\t{}", self.next.lexeme));
        self.session.trace("");
    }

    // ========================================
    // Dispatch
    // ========================================

    /// Dispatch the current operator pair through the CONO table.
    pub(crate) fn dispatch(&mut self) -> Result<()> {
        use actions::ActionSet;

        // `call`, `proc` and block-end keywords only ever pair with a
        // semicolon; diagnose the missing one before the table lookup.
        if self.current.kind == TokenKind::Call && self.next.kind != TokenKind::Semicolon {
            return Err(self
                .session
                .error("No semicolon found following procedure call"));
        }
        if self.current.kind == TokenKind::Proc && self.next.kind != TokenKind::Semicolon {
            return Err(self
                .session
                .error("No semicolon found following procedure definition"));
        }
        if self.current.kind == TokenKind::End && self.next.kind != TokenKind::Semicolon {
            return Err(self
                .session
                .error("No semicolon found following end of control block"));
        }

        let row = match category_index(self.current.kind) {
            Some(row) => row,
            None => {
                return Err(self
                    .session
                    .error("Token passed to code generator is not a valid type"))
            }
        };
        let column = match category_index(self.next.kind) {
            Some(column) => column,
            None => {
                return Err(self
                    .session
                    .error("Token passed to code generator is not a valid type"))
            }
        };

        match CONO[row][column] {
            Action::Assignment => self.assignment(),
            Action::BeginCondition => self.begin_condition(),
            Action::CallProcedure => self.call_procedure(),
            Action::EndBlock => self.end_block(),
            Action::EndExpression => {
                self.end_expression();
                Ok(())
            }
            Action::EqualOperators => self.equal_operators(),
            Action::GreaterOperators => self.greater_operators(),
            Action::LessOperators => Ok(()),
            Action::NoOp => Ok(()),
            Action::Parentheses => self.parentheses(),
            Action::ProcedureDefinition => self.procedure_definition(),
            Action::Subscript => self.subscript(),
            Action::Write => self.write_statement(),
            Action::Error => Err(self.session.error("Invalid code generator function call")),
        }
    }

    // ========================================
    // Back-Patching
    // ========================================

    /// Patch a branch instruction's operand with a relative offset.
    ///
    /// `address` is the opcode's offset; the two bytes after it receive
    /// `value - address`, the JVM's branch-relative convention.
    pub(crate) fn fill_address(&mut self, address: i32, value: i32) {
        self.emitter.patch(address + 1, value - address, self.session);
    }

    /// Remember an instruction whose target symbol is not yet defined.
    pub(crate) fn save_forward_reference(&mut self, target: SymbolId, at: i32) {
        self.forward_refs.push(ForwardReference { at, target });
    }

    /// Resolve every saved forward reference against the symbol table.
    pub(crate) fn fill_forward_references(&mut self) -> Result<()> {
        while let Some(reference) = self.forward_refs.pop() {
            match self.symbols.get(reference.target).address {
                Some(address) => self.fill_address(reference.at, address),
                None => {
                    return Err(self
                        .session
                        .error("Symbol is referenced but was not defined"))
                }
            }
        }
        Ok(())
    }

    // ========================================
    // Small Helpers
    // ========================================

    /// Pop the deferred-operator stack.
    pub(crate) fn pop_operator(&mut self) -> Result<Token> {
        match self.operator_stack.pop() {
            Some(token) => Ok(token),
            None => Err(self.session.error("Unbalanced expression")),
        }
    }

    /// Numeric value of the current literal operand.
    pub(crate) fn literal_value(&mut self) -> Result<i32> {
        match self.literal {
            Some(value) => Ok(value),
            None => Err(self.session.error("Invalid literal")),
        }
    }

    /// Dump the symbol and literal tables to the trace sink.
    fn dump_tables(&mut self) {
        if !self.session.tracing() {
            return;
        }

        self.session.trace("Symbol Table Output");
        let mut lines = Vec::new();
        for symbol in self.symbols.iter() {
            let separator = if symbol.lexeme.len() < 8 { "\t\t" } else { "\t" };
            lines.push(format!(
                "Lexeme: {}{}Type: {}  \tAddress: {}",
                symbol.lexeme,
                separator,
                symbol.kind.label(),
                symbol.address.unwrap_or(-1)
            ));
        }
        for line in lines {
            self.session.trace(&line);
        }
        self.session.trace("");

        self.session.trace("Literal Table Output");
        let mut lines = Vec::new();
        for literal in self.literals.iter() {
            lines.push(format!("Lexeme: {}", literal.lexeme));
        }
        for line in lines {
            self.session.trace(&line);
        }
        self.session.trace("");
    }
}
