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

//! Expression compilation for the parser.
//!
//! Expressions are compiled by the same CONO dispatch loop as the rest of
//! the program: each operand is pushed on the runtime stack as it is
//! scanned and operators are deferred on the operator stack until the
//! table decides their precedence has been reached. Conditions are two
//! expressions joined by a relational operator, compiled into the inverted
//! branch instruction so the fall-through path is the taken body.

use super::{Parser, Status};
use crate::emitter::Opcode;
use crate::error::Result;
use crate::scanner::{Token, TokenKind};
use crate::symtab::SymbolKind;

/// Extension trait for expression compilation.
pub trait ExpressionCompiler {
    /// Compile one arithmetic expression.
    fn compile_expression(&mut self) -> Result<()>;

    /// Compile a relational condition into an inverted branch.
    fn compile_condition(&mut self) -> Result<()>;

    /// Push the operand the window just scanned, if any.
    fn enter_operand(&mut self) -> Result<()>;

    /// Push a symbol or literal operand onto the runtime stack.
    fn push_operand(&mut self, operand: Token) -> Result<()>;

    /// Push an integer constant using the shortest encoding.
    fn push_constant(&mut self, value: i32);
}

impl<'a> ExpressionCompiler for Parser<'a> {
    fn compile_expression(&mut self) -> Result<()> {
        self.in_expression = true;
        self.status = Status::Freeze;
        self.enter_operand()?;

        while self.in_expression {
            match self.status {
                Status::Exit => self.in_expression = false,
                Status::Freeze => self.status = Status::Continue,
                Status::Continue => {
                    // Defer the current operator and take in the next
                    // operand before deciding what to emit.
                    let deferred = self.current.clone();
                    self.operator_stack.push(deferred);
                    self.advance()?;
                    self.enter_operand()?;
                }
            }

            // Dispatch on every pass, including the final one; the
            // terminating actions tolerate being invoked twice.
            self.dispatch()?;
        }

        Ok(())
    }

    fn compile_condition(&mut self) -> Result<()> {
        self.compile_expression()?;

        let relational_operator = self.next.lexeme.clone();
        self.advance()?;
        self.compile_expression()?;

        // The branch is taken when the condition FAILS, so each operator
        // compiles to its inverse. The zero operand is back-patched when
        // the block closes.
        let opcode = match relational_operator.as_str() {
            "<" => Opcode::IfIcmpge,
            "<=" => Opcode::IfIcmpgt,
            "=" => Opcode::IfIcmpne,
            ">=" => Opcode::IfIcmplt,
            ">" => Opcode::IfIcmple,
            "<>" => Opcode::IfIcmpeq,
            _ => return Err(self.session.error("Invalid relational operator")),
        };
        self.emitter.emit_wide(opcode, 0, self.session);
        Ok(())
    }

    fn enter_operand(&mut self) -> Result<()> {
        let operand = match self.operand.clone() {
            Some(operand) => operand,
            None => return Ok(()),
        };

        if operand.lexeme == "length" {
            // `length <array>` loads the array and asks the JVM for its
            // size. The window slides past both words, so the operator we
            // started from is parked on the stack meanwhile.
            let resumed = self.current.clone();
            self.operator_stack.push(resumed);

            self.advance()?;
            let address = match self.symbol.map(|id| self.symbols.get(id).address) {
                Some(Some(address)) => address,
                _ => return Err(self.session.error("Reference to undefined symbol")),
            };
            self.emitter
                .choose_op(Opcode::Aload, Opcode::Aload0, address, self.session);
            self.emitter.emit(Opcode::Arraylength, self.session);
            self.advance()?;

            self.current = self.pop_operator()?;
            Ok(())
        } else {
            self.push_operand(operand)
        }
    }

    fn push_operand(&mut self, operand: Token) -> Result<()> {
        if operand.kind == TokenKind::Literal {
            let value = match self.literals.value_of(&operand.lexeme) {
                Some(value) => value,
                None => return Err(self.session.error("Invalid literal")),
            };
            self.push_constant(value);
            return Ok(());
        }

        let id = match self.symbols.lookup(&operand.lexeme) {
            Some(id) => id,
            None => return Err(self.session.error("Reference to undefined symbol")),
        };
        let (kind, address) = {
            let symbol = self.symbols.get(id);
            (symbol.kind, symbol.address)
        };
        let address = match address {
            Some(address) => address,
            None => return Err(self.session.error("Reference to undefined symbol")),
        };

        if kind == SymbolKind::Array {
            self.emitter
                .choose_op(Opcode::Aload, Opcode::Aload0, address, self.session);
        } else if self.next.kind != TokenKind::LBracket {
            self.emitter
                .choose_op(Opcode::Iload, Opcode::Iload0, address, self.session);
        } else {
            return Err(self.session.error("Subscript given for non-array symbol"));
        }
        Ok(())
    }

    fn push_constant(&mut self, value: i32) {
        match value {
            0 => self.emitter.emit(Opcode::Iconst0, self.session),
            1 => self.emitter.emit(Opcode::Iconst1, self.session),
            2 => self.emitter.emit(Opcode::Iconst2, self.session),
            3 => self.emitter.emit(Opcode::Iconst3, self.session),
            4 => self.emitter.emit(Opcode::Iconst4, self.session),
            5 => self.emitter.emit(Opcode::Iconst5, self.session),
            6..=127 => self.emitter.emit_byte(Opcode::Bipush, value as u8, self.session),
            128..=32767 => self.emitter.emit_wide(Opcode::Sipush, value, self.session),
            _ => {
                // Wider than sipush: rebuild the value as
                // 32767 * (value / 32767) + value % 32767 on the stack.
                let multiple = value / 32767;
                self.emitter.emit_wide(Opcode::Sipush, 32767, self.session);
                self.emitter.emit_wide(Opcode::Sipush, multiple, self.session);
                self.emitter.emit(Opcode::Imul, self.session);
                self.emitter
                    .emit_wide(Opcode::Sipush, value % 32767, self.session);
                self.emitter.emit(Opcode::Iadd, self.session);
            }
        }
    }
}
