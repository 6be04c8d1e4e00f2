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

//! The code generators the CONO table dispatches to.
//!
//! Each action sees the token window at the moment its operator pair was
//! recognized and emits bytecode for it. Statement-level actions
//! (assignment, begin-condition, write) pull whole expressions through
//! [`ExpressionCompiler`]; the operator-pair actions inside expressions
//! manage the deferred-operator stack and the loop status instead.

use super::expressions::ExpressionCompiler;
use super::{Parser, Status};
use crate::emitter::Opcode;
use crate::error::Result;
use crate::scanner::TokenKind;
use crate::symtab::{StructKind, Structure, SymbolKind};

/// Extension trait for the table-dispatched code generators.
pub trait ActionSet {
    /// Compile a scalar or array-element assignment.
    fn assignment(&mut self) -> Result<()>;

    /// Open an `if`/`while` block and compile its condition.
    fn begin_condition(&mut self) -> Result<()>;

    /// Emit a subroutine call, recording a forward reference if needed.
    fn call_procedure(&mut self) -> Result<()>;

    /// Close the innermost open block.
    fn end_block(&mut self) -> Result<()>;

    /// Terminate the current expression loop.
    fn end_expression(&mut self);

    /// Emit the deferred operator matching the current lexeme.
    fn equal_operators(&mut self) -> Result<()>;

    /// Emit the deferred operator, holding the window for one dispatch.
    fn greater_operators(&mut self) -> Result<()>;

    /// Close a parenthesized subexpression.
    fn parentheses(&mut self) -> Result<()>;

    /// Define a procedure at the current address.
    fn procedure_definition(&mut self) -> Result<()>;

    /// Handle a closing bracket: element load or store-target terminator.
    fn subscript(&mut self) -> Result<()>;

    /// Compile a `write` statement's expression list.
    fn write_statement(&mut self) -> Result<()>;
}

impl<'a> ActionSet for Parser<'a> {
    fn assignment(&mut self) -> Result<()> {
        if self.next.kind == TokenKind::LBracket {
            // Assignment to an array element. The opening bracket is
            // relabeled so the closing bracket's subscript action knows to
            // terminate the index expression instead of loading a value.
            self.next.lexeme = "[[".to_string();

            let target = match self.operand.clone() {
                Some(target) => target,
                None => return Err(self.session.error("Reference to undefined symbol")),
            };
            self.push_operand(target)?;
            self.advance()?;

            // Index expression, then skip `] :=` and do the value.
            self.compile_expression()?;
            self.advance()?;
            self.advance()?;
            self.compile_expression()?;
            self.emitter.emit(Opcode::Iastore, self.session);
            return Ok(());
        }

        // Scalar assignment.
        let id = match self.symbol {
            Some(id) => id,
            None => return Err(self.session.error("Reference to undefined symbol")),
        };
        let (kind, address) = {
            let symbol = self.symbols.get(id);
            (symbol.kind, symbol.address)
        };
        if kind == SymbolKind::Constant {
            return Err(self
                .session
                .error("Cannot change the value of a const symbol"));
        }
        let address = match address {
            Some(address) => address,
            None => return Err(self.session.error("Reference to undefined symbol")),
        };

        self.advance()?;
        self.compile_expression()?;
        self.emitter
            .choose_op(Opcode::Istore, Opcode::Istore0, address, self.session);
        Ok(())
    }

    fn begin_condition(&mut self) -> Result<()> {
        let kind = if self.next.lexeme == "if" {
            StructKind::If
        } else {
            StructKind::While
        };

        let mut block = Structure::new(kind);
        block.condition_addr = self.emitter.pc();
        self.advance()?;
        self.compile_condition()?;

        // The condition ended with a three-byte branch whose operand is
        // patched when the block closes.
        block.patch_addr = self.emitter.pc() - 3;
        self.structures.push(block);
        Ok(())
    }

    fn call_procedure(&mut self) -> Result<()> {
        let id = match self.symbol {
            Some(id) => id,
            None => {
                return Err(self
                    .session
                    .error("No symbol name provided for procedure call"))
            }
        };
        let (kind, address) = {
            let symbol = self.symbols.get(id);
            (symbol.kind, symbol.address)
        };

        match kind {
            SymbolKind::Unknown => {
                // First sighting of the name; the definition must follow
                // later in the source.
                self.symbols.get_mut(id).kind = SymbolKind::ForwardProc;
                let at = self.emitter.pc();
                self.save_forward_reference(id, at);
                self.emitter.emit_wide(Opcode::Jsr, 0, self.session);
            }
            SymbolKind::ForwardProc => {
                let at = self.emitter.pc();
                self.save_forward_reference(id, at);
                self.emitter.emit_wide(Opcode::Jsr, 0, self.session);
            }
            _ => {
                let address = match address {
                    Some(address) => address,
                    None => return Err(self.session.error("Reference to undefined symbol")),
                };
                let offset = address - self.emitter.pc();
                self.emitter.emit_wide(Opcode::Jsr, offset, self.session);
            }
        }
        Ok(())
    }

    fn end_block(&mut self) -> Result<()> {
        let block = match self.structures.pop() {
            Some(block) => block,
            None => {
                return Err(self
                    .session
                    .error("Structure type does not match control block"))
            }
        };

        match (block.kind, self.next.lexeme.as_str()) {
            (StructKind::Else, "endif") => {
                let pc = self.emitter.pc();
                self.fill_address(block.patch_addr, pc);
            }
            (StructKind::If, "else") => {
                // The if-body ends with an unconditional jump over the
                // else-body; the if's own branch lands just after it.
                let mut else_block = Structure::new(StructKind::Else);
                else_block.patch_addr = self.emitter.pc();
                self.emitter.emit_wide(Opcode::Goto, 0, self.session);
                self.structures.push(else_block);

                let pc = self.emitter.pc();
                self.fill_address(block.patch_addr, pc);
            }
            (StructKind::If, "endif") => {
                let pc = self.emitter.pc();
                self.fill_address(block.patch_addr, pc);
            }
            (StructKind::While, "endwhile") => {
                let offset = block.condition_addr - self.emitter.pc();
                self.emitter.emit_wide(Opcode::Goto, offset, self.session);

                let pc = self.emitter.pc();
                self.fill_address(block.patch_addr, pc);
            }
            (StructKind::Proc, "endproc") => {
                // Restore the return address saved in slot 0 and return
                // through it. Execution of the main body starts after the
                // last procedure, so $MAIN tracks the current address.
                self.emitter.emit(Opcode::Astore0, self.session);
                self.emitter.emit_byte(Opcode::Ret, 0, self.session);
                if let Some(main) = self.symbols.lookup("$MAIN") {
                    let pc = self.emitter.pc();
                    self.symbols.get_mut(main).address = Some(pc);
                }
            }
            (StructKind::Program, "endprogram") => {
                self.emitter.emit(Opcode::Return, self.session);
                self.status = Status::Exit;
            }
            _ => {
                return Err(self
                    .session
                    .error("Structure type does not match control block"))
            }
        }
        Ok(())
    }

    fn end_expression(&mut self) {
        self.status = Status::Exit;
    }

    fn equal_operators(&mut self) -> Result<()> {
        match self.current.lexeme.as_str() {
            "+" => self.emitter.emit(Opcode::Iadd, self.session),
            "-" => self.emitter.emit(Opcode::Isub, self.session),
            "*" => self.emitter.emit(Opcode::Imul, self.session),
            "/" => self.emitter.emit(Opcode::Idiv, self.session),
            _ => return Err(self.session.error("Invalid expression operator")),
        }
        self.current = self.pop_operator()?;
        Ok(())
    }

    fn greater_operators(&mut self) -> Result<()> {
        self.status = Status::Freeze;
        self.equal_operators()
    }

    fn parentheses(&mut self) -> Result<()> {
        self.advance()?;
        self.current = self.pop_operator()?;
        self.status = Status::Freeze;
        Ok(())
    }

    fn procedure_definition(&mut self) -> Result<()> {
        let id = match self.symbol {
            Some(id) => id,
            None => {
                return Err(self
                    .session
                    .error("No symbol name provided for procedure definition"))
            }
        };
        if self.symbols.get(id).address.is_some() {
            return Err(self.session.error("Symbol has already been defined"));
        }

        let pc = self.emitter.pc();
        let symbol = self.symbols.get_mut(id);
        symbol.address = Some(pc);
        symbol.kind = SymbolKind::Procedure;
        self.structures.push(Structure::new(StructKind::Proc));
        Ok(())
    }

    fn subscript(&mut self) -> Result<()> {
        if self.current.lexeme == "[[" {
            // Closing bracket of an assignment target: the index is
            // complete, the store is emitted by the assignment action.
            self.end_expression();
            Ok(())
        } else {
            // Closing bracket of an element reference.
            self.emitter.emit(Opcode::Iaload, self.session);
            self.parentheses()
        }
    }

    fn write_statement(&mut self) -> Result<()> {
        while self.next.kind != TokenKind::Semicolon {
            self.advance()?;
            self.emitter.emit_wide(Opcode::Getstatic, 6, self.session);
            self.compile_expression()?;
            self.emitter
                .emit_wide(Opcode::Invokevirtual, 7, self.session);
        }
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
    fn test_if_branch_is_patched_past_body() {
        let code = compile_body("program p; var x; if x < 3 then x := 1; endif; endprogram");
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, // x = 0
                0x1b, 0x06, // iload_1, iconst_3
                0xa2, 0x00, 0x05, // if_icmpge past the body
                0x04, 0x3c, // x := 1
                0xb1,
            ]
        );
    }

    #[test]
    fn test_if_else_emits_jump_over_else_body() {
        let code = compile_body(
            "program p; var x; if x = 0 then x := 1; else x := 2; endif; endprogram",
        );
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, // x = 0
                0x1b, 0x03, // iload_1, iconst_0
                0xa0, 0x00, 0x08, // if_icmpne to the else body
                0x04, 0x3c, // x := 1
                0xa7, 0x00, 0x05, // goto past the else body
                0x05, 0x3c, // x := 2
                0xb1,
            ]
        );
    }

    #[test]
    fn test_while_loops_back_to_condition() {
        let code =
            compile_body("program p; var i; while i < 10 do i := i + 1; endwhile; endprogram");
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, // i = 0
                0x1b, 0x10, 0x0a, // iload_1, bipush 10
                0xa2, 0x00, 0x0a, // if_icmpge past the loop
                0x1b, 0x04, 0x60, 0x3c, // i := i + 1
                0xa7, 0xff, 0xf6, // goto back to the condition
                0xb1,
            ]
        );
    }

    #[test]
    fn test_array_element_assignment() {
        let code = compile_body("program p; var a[5]; a[2] := 7; endprogram");
        assert_eq!(
            code,
            vec![
                0x08, 0xbc, 0x0a, 0x4c, // iconst_5, newarray int, astore_1
                0x2b, // aload_1
                0x05, // iconst_2 (index)
                0x10, 0x07, // bipush 7 (value)
                0x4f, // iastore
                0xb1,
            ]
        );
    }

    #[test]
    fn test_write_emits_stream_and_call() {
        let code = compile_body("program p; var x; x := 5; write x; endprogram");
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, 0x08, 0x3c, // declaration and x := 5
                0xb2, 0x00, 0x06, // getstatic (output stream)
                0x1b, // iload_1
                0xb6, 0x00, 0x07, // invokevirtual (print)
                0xb1,
            ]
        );
    }

    #[test]
    fn test_write_list_prints_each_expression() {
        let code = compile_body("program p; var x; write x, x + 1; endprogram");
        assert_eq!(
            code,
            vec![
                0x03, 0x3c, // x = 0
                0xb2, 0x00, 0x06, 0x1b, 0xb6, 0x00, 0x07, // write x
                0xb2, 0x00, 0x06, 0x1b, 0x04, 0x60, 0xb6, 0x00, 0x07, // write x + 1
                0xb1,
            ]
        );
    }

    #[test]
    fn test_forward_and_backward_procedure_calls() {
        let code = compile_body(
            "program p;\nproc a;\ncall b;\nendproc;\nproc b;\nwrite 1;\nendproc;\ncall a;\nendprogram",
        );
        assert_eq!(
            code,
            vec![
                0xa7, 0x00, 0x13, // goto $MAIN (0x12f - 0x11c)
                0xa8, 0x00, 0x06, // proc a: jsr b, forward-patched
                0x4b, 0xa9, 0x00, // astore_0, ret 0
                0xb2, 0x00, 0x06, 0x04, 0xb6, 0x00, 0x07, // proc b: write 1
                0x4b, 0xa9, 0x00, // astore_0, ret 0
                0xa8, 0xff, 0xf0, // $MAIN: jsr a, backward
                0xb1,
            ]
        );
    }

    #[test]
    fn test_assignment_to_const_rejected() {
        let message =
            compile_err("program p; const c = 4; var x; c := 1; endprogram");
        assert_eq!(message, "Cannot change the value of a const symbol");
    }

    #[test]
    fn test_call_of_undefined_procedure_rejected() {
        let message = compile_err("program p;\nproc a;\ncall b;\nendproc;\ncall a;\nendprogram");
        assert_eq!(message, "Symbol is referenced but was not defined");
    }

    #[test]
    fn test_missing_semicolon_after_call() {
        let message = compile_err("program p;\nproc a;\nwrite 1;\nendproc;\ncall a endprogram");
        assert_eq!(message, "No semicolon found following procedure call");
    }

    #[test]
    fn test_procedure_redefinition_rejected() {
        let message = compile_err(
            "program p;\nproc a;\nwrite 1;\nendproc;\nproc a;\nwrite 2;\nendproc;\ncall a;\nendprogram",
        );
        assert_eq!(message, "Symbol has already been defined");
    }
}
