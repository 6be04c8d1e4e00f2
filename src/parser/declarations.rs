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

//! Declaration sections: `const`, `var` and the procedure bodies.
//!
//! Declarations are compiled directly, without going through the CONO
//! table: every name is assigned the next free local slot and its initial
//! value (or zero) is stored there, so a LITTLE declaration costs real
//! instructions at the top of the program. Arrays get a `newarray` of
//! their declared size plus one store per initializer element.

use super::expressions::ExpressionCompiler;
use super::{Parser, Status};
use crate::emitter::Opcode;
use crate::error::Result;
use crate::scanner::{Token, TokenKind};
use crate::symtab::{SymbolId, SymbolKind};

/// Extension trait for the declaration sections.
pub trait DeclarationCompiler {
    /// Compile the `const` section.
    fn compile_constants(&mut self) -> Result<()>;

    /// Compile the `var` section.
    fn compile_variables(&mut self) -> Result<()>;

    /// Compile procedure definitions and the main body.
    fn compile_procedures(&mut self) -> Result<()>;
}

impl<'a> DeclarationCompiler for Parser<'a> {
    fn compile_constants(&mut self) -> Result<()> {
        while self.next.kind != TokenKind::Semicolon {
            self.advance()?;

            let id = match self.symbol {
                Some(id) => id,
                None => {
                    return Err(self
                        .session
                        .error("Invalid operator found in constant declarations"))
                }
            };
            if self.symbols.get(id).address.is_some() {
                return Err(self.session.error("Symbol has already been defined"));
            }

            let slot = self.next_location;
            {
                let symbol = self.symbols.get_mut(id);
                symbol.address = Some(slot);
                symbol.kind = SymbolKind::Constant;
            }

            if self.next.lexeme == "=" {
                self.advance()?;
                let value = self.literal_value()?;
                self.push_constant(value);
            } else if matches!(self.next.kind, TokenKind::Comma | TokenKind::Semicolon) {
                // Uninitialized constants are zero.
                self.push_constant(0);
            } else {
                return Err(self
                    .session
                    .error("Invalid operator found in constant declarations"));
            }

            self.emitter
                .choose_op(Opcode::Istore, Opcode::Istore0, slot, self.session);
            self.next_location += 1;
        }

        self.advance()
    }

    fn compile_variables(&mut self) -> Result<()> {
        while self.next.kind != TokenKind::Semicolon {
            self.advance()?;

            let id = match self.symbol {
                Some(id) => id,
                None => {
                    return Err(self
                        .session
                        .error("Invalid operator found in variable declarations"))
                }
            };
            if self.symbols.get(id).address.is_some() {
                return Err(self.session.error("Symbol has already been defined"));
            }

            let slot = self.next_location;
            self.symbols.get_mut(id).address = Some(slot);

            if self.next.kind == TokenKind::LBracket {
                self.compile_array_declaration(id, slot)?;
            } else {
                self.compile_scalar_declaration(id, slot)?;
            }

            self.next_location += 1;
        }

        self.advance()
    }

    fn compile_procedures(&mut self) -> Result<()> {
        self.status = Status::Continue;

        // A program with procedures starts with a jump over them to the
        // main body; $MAIN's address is only known at the last `endproc`.
        if self.next.kind == TokenKind::Proc {
            let main = self.symbols.intern("$MAIN");
            let at = self.emitter.pc();
            self.save_forward_reference(main, at);
            self.emitter.emit_wide(Opcode::Goto, 0, self.session);
        }

        // The program structure pushed for the header is popped by the
        // `endprogram` end-block action.
        while !self.structures.is_empty() {
            self.dispatch()?;
            self.advance()?;
        }

        self.fill_forward_references()
    }
}

impl<'a> Parser<'a> {
    /// Compile one array declaration, with optional `= { ... }` initializer.
    fn compile_array_declaration(&mut self, id: SymbolId, slot: i32) -> Result<()> {
        let lexeme = self.symbols.get(id).lexeme.clone();
        let array = Token::new(TokenKind::Symbol, lexeme);
        self.symbols.get_mut(id).kind = SymbolKind::Array;
        self.advance()?;

        let size = match self.literal {
            Some(size) if (1..=100).contains(&size) => size,
            _ => return Err(self.session.error("Illegal array declaration")),
        };
        self.push_constant(size);
        // Operand 10 is the newarray type code for int.
        self.emitter.emit_byte(Opcode::Newarray, 10, self.session);
        self.emitter
            .choose_op(Opcode::Astore, Opcode::Astore0, slot, self.session);
        self.advance()?;

        if self.next.kind == TokenKind::RelOp {
            // Brace-enclosed initializer list; elements are stored in
            // declaration order starting at index zero.
            self.advance()?;
            let mut index = 0;
            while self.next.kind != TokenKind::RBrace {
                self.advance()?;
                self.push_operand(array.clone())?;
                self.push_constant(index);
                let element = match self.operand.clone() {
                    Some(element) => element,
                    None => {
                        return Err(self
                            .session
                            .error("Invalid operator found in variable declarations"))
                    }
                };
                self.push_operand(element)?;
                self.emitter.emit(Opcode::Iastore, self.session);
                index += 1;
            }
            self.advance()?;
        }

        Ok(())
    }

    /// Compile one scalar variable declaration.
    fn compile_scalar_declaration(&mut self, id: SymbolId, slot: i32) -> Result<()> {
        self.symbols.get_mut(id).kind = SymbolKind::Variable;

        if self.next.lexeme == "=" {
            self.advance()?;
            let initializer = match self.operand.clone() {
                Some(initializer) => initializer,
                None => {
                    return Err(self
                        .session
                        .error("Invalid operator found in variable declarations"))
                }
            };
            if initializer.kind == TokenKind::Literal {
                let value = self.literal_value()?;
                self.push_constant(value);
            } else {
                // Initializer names an earlier declaration.
                self.push_operand(initializer)?;
            }
        } else if matches!(self.next.kind, TokenKind::Comma | TokenKind::Semicolon) {
            self.push_constant(0);
        } else {
            return Err(self
                .session
                .error("Invalid operator found in variable declarations"));
        }

        self.emitter
            .choose_op(Opcode::Istore, Opcode::Istore0, slot, self.session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::emitter::instructions;
    use crate::session::Session;

    fn compile_body(source: &str) -> Vec<u8> {
        let mut session = Session::new();
        let image = super::super::compile(source, &mut session).expect("compile failed");
        instructions(&image).to_vec()
    }

    fn compile_err(source: &str) -> String {
        let mut session = Session::new();
        super::super::compile(source, &mut session)
            .unwrap_err()
            .message
    }

    #[test]
    fn test_constants_store_initial_values() {
        let code = compile_body("program p; const a = 3, b; endprogram");
        // a = 3 in slot 1, b defaults to 0 in slot 2.
        assert_eq!(code, vec![0x06, 0x3c, 0x03, 0x3d, 0xb1]);
    }

    #[test]
    fn test_variable_initialized_from_constant() {
        let code = compile_body("program p; const c = 9; var x = c; endprogram");
        assert_eq!(
            code,
            vec![
                0x10, 0x09, 0x3c, // c = 9 in slot 1
                0x1b, 0x3d, // x copies c into slot 2
                0xb1,
            ]
        );
    }

    #[test]
    fn test_array_initializer_list() {
        let code = compile_body("program p; var a[3] = {4, 5, 6}; endprogram");
        assert_eq!(
            code,
            vec![
                0x06, 0xbc, 0x0a, 0x4c, // iconst_3, newarray int, astore_1
                0x2b, 0x03, 0x07, 0x4f, // a[0] = 4
                0x2b, 0x04, 0x08, 0x4f, // a[1] = 5
                0x2b, 0x05, 0x10, 0x06, 0x4f, // a[2] = 6
                0xb1,
            ]
        );
    }

    #[test]
    fn test_slots_past_three_use_wide_stores() {
        let code = compile_body("program p; var a, b, c, d; endprogram");
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, // slot 1, compact
                0x03, 0x3d, // slot 2
                0x03, 0x3e, // slot 3
                0x03, 0x36, 0x04, // slot 4 needs the two-byte form
                0xb1,
            ]
        );
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let message = compile_err("program p; const a = 1, a = 2; endprogram");
        assert_eq!(message, "Symbol has already been defined");
    }

    #[test]
    fn test_array_size_bounds() {
        let message = compile_err("program p; var a[0]; endprogram");
        assert_eq!(message, "Illegal array declaration");
        let message = compile_err("program p; var a[101]; endprogram");
        assert_eq!(message, "Illegal array declaration");
    }

    #[test]
    fn test_stray_operator_in_const_section() {
        let message = compile_err("program p; const a := 1; endprogram");
        assert_eq!(message, "Invalid operator found in constant declarations");
    }
}
