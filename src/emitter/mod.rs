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

//! Emitter module for the littlec compiler.
//!
//! Owns the output buffer, pre-seeded with the fixed class-file template,
//! and appends instructions from [`CODE_START`] onward. Besides plain
//! emission it supports patching already-written 16-bit operands (used
//! for back-patches and forward-reference resolution) and the compact
//! single-byte encoding of low-numbered local variable accesses.

mod opcodes;

pub use opcodes::{
    Opcode, ATTRIBUTE_LENGTH_OFFSET, CLASS_TEMPLATE, CODE_LENGTH_OFFSET, CODE_START,
    MAX_ATTRIBUTE_LENGTH,
};

use crate::error::Result;
use crate::session::Session;

/// The instruction stream of a finalized class-file image: everything
/// between the fixed template and the six-byte trailer.
pub fn instructions(image: &[u8]) -> &[u8] {
    &image[CODE_START..image.len() - 6]
}

/// Assembles the output class file.
pub struct Emitter {
    code: Vec<u8>,
}

impl Emitter {
    /// Create an emitter seeded with the class-file template.
    pub fn new() -> Self {
        Self {
            code: CLASS_TEMPLATE.to_vec(),
        }
    }

    /// Address of the next instruction to be emitted.
    pub fn pc(&self) -> i32 {
        self.code.len() as i32
    }

    /// Emit a one-byte instruction.
    pub fn emit(&mut self, op: Opcode, session: &mut Session) {
        let pc = self.pc();
        self.code.push(op as u8);
        if session.tracing() {
            session.trace(&format!("Emitter - Emit(op) called (line {})", session.line()));
            session.trace(&format!("   program counter:\t{}", pc));
            session.trace(&format!("   instruction:\t\t{}", op.mnemonic()));
            session.trace("");
        }
    }

    /// Emit a two-byte instruction: opcode plus one operand byte.
    pub fn emit_byte(&mut self, op: Opcode, operand: u8, session: &mut Session) {
        let pc = self.pc();
        self.code.push(op as u8);
        self.code.push(operand);
        if session.tracing() {
            session.trace(&format!(
                "Emitter - Emit(op, byte) called (line {})",
                session.line()
            ));
            session.trace(&format!("   program counter:\t{}", pc));
            session.trace(&format!("   instruction:\t\t{} {}", op.mnemonic(), operand));
            session.trace("");
        }
    }

    /// Emit a three-byte instruction: opcode plus a big-endian 16-bit
    /// operand (truncating the given value to 16 bits).
    pub fn emit_wide(&mut self, op: Opcode, operand: i32, session: &mut Session) {
        let pc = self.pc();
        let hi = ((operand >> 8) & 0xff) as u8;
        let lo = (operand & 0xff) as u8;
        self.code.push(op as u8);
        self.code.push(hi);
        self.code.push(lo);
        if session.tracing() {
            session.trace(&format!(
                "Emitter - Emit(op, wide) called (line {})",
                session.line()
            ));
            session.trace(&format!("   program counter:\t{}", pc));
            session.trace(&format!(
                "   instruction:\t\t{} {} {}",
                op.mnemonic(),
                hi,
                lo
            ));
            session.trace("");
        }
    }

    /// Overwrite the two bytes at `address` with a big-endian 16-bit
    /// value. Used to fill forward references and back-patches.
    pub fn patch(&mut self, address: i32, contents: i32, session: &mut Session) {
        let at = address as usize;
        let hi = ((contents >> 8) & 0xff) as u8;
        let lo = (contents & 0xff) as u8;
        self.code[at] = hi;
        self.code[at + 1] = lo;
        if session.tracing() {
            session.trace(&format!(
                "Emitter - Patch(address, contents) called (line {})",
                session.line()
            ));
            session.trace(&format!("   address:\t\t{}", address));
            session.trace(&format!("   contents:\t\t{} {}", hi, lo));
            session.trace("");
        }
    }

    /// Emit a local-variable access, choosing the compact encoding when
    /// possible: slots 0 through 3 get the dedicated single-byte form
    /// (`short_op` + slot), anything higher the general two-byte form.
    pub fn choose_op(&mut self, long_op: Opcode, short_op: Opcode, location: i32, session: &mut Session) {
        if location <= 3 {
            let pc = self.pc();
            self.code.push((short_op as u8).wrapping_add(location as u8));
            if session.tracing() {
                session.trace(&format!("Emitter - Emit(op) called (line {})", session.line()));
                session.trace(&format!("   program counter:\t{}", pc));
                session.trace(&format!(
                    "   instruction:\t\t{}+{}",
                    short_op.mnemonic(),
                    location
                ));
                session.trace("");
            }
        } else {
            self.emit_byte(long_op, location as u8, session);
        }
    }

    /// Back-fill the two length fields, append the six-byte trailer and
    /// hand the finished image over. Fails if the code attribute would
    /// overflow its 16-bit length field.
    pub fn finalize(mut self, session: &mut Session) -> Result<Vec<u8>> {
        let code_length = self.code.len() - CODE_START;
        let attribute_length = code_length + 12;

        if attribute_length > MAX_ATTRIBUTE_LENGTH {
            return Err(session.error("Program is too long to compile"));
        }

        self.code[CODE_LENGTH_OFFSET] = ((code_length >> 8) & 0xff) as u8;
        self.code[CODE_LENGTH_OFFSET + 1] = (code_length & 0xff) as u8;
        self.code[ATTRIBUTE_LENGTH_OFFSET] = ((attribute_length >> 8) & 0xff) as u8;
        self.code[ATTRIBUTE_LENGTH_OFFSET + 1] = (attribute_length & 0xff) as u8;

        self.code.extend_from_slice(&[0; 6]);

        session.trace("Emitter - finalize completed");
        session.trace("");
        Ok(self.code)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
