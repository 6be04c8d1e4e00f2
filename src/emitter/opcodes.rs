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

//! JVM opcode subset and the fixed class-file template.

/// The JVM instructions the code generator emits.
///
/// Short-form register variants above `_0` (for example `iload_2`) are
/// produced arithmetically by [`crate::emitter::Emitter::choose_op`], so
/// only the `_0` member of each family is named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Load array reference from a local variable.
    Aload = 0x19,
    /// Load array reference from local variable 0.
    Aload0 = 0x2a,
    /// Get length of array.
    Arraylength = 0xbe,
    /// Store array reference into a local variable.
    Astore = 0x3a,
    /// Store array reference into local variable 0.
    Astore0 = 0x4b,
    /// Push byte constant.
    Bipush = 0x10,
    /// Get static field from class.
    Getstatic = 0xb2,
    /// Unconditional branch.
    Goto = 0xa7,
    /// Add integers.
    Iadd = 0x60,
    /// Load integer from array.
    Iaload = 0x2e,
    /// Store into integer array.
    Iastore = 0x4f,
    /// Push 0 onto the stack.
    Iconst0 = 0x03,
    /// Push 1 onto the stack.
    Iconst1 = 0x04,
    /// Push 2 onto the stack.
    Iconst2 = 0x05,
    /// Push 3 onto the stack.
    Iconst3 = 0x06,
    /// Push 4 onto the stack.
    Iconst4 = 0x07,
    /// Push 5 onto the stack.
    Iconst5 = 0x08,
    /// Divide integers.
    Idiv = 0x6c,
    /// Branch if equal.
    IfIcmpeq = 0x9f,
    /// Branch if not equal.
    IfIcmpne = 0xa0,
    /// Branch if less than.
    IfIcmplt = 0xa1,
    /// Branch if greater than or equal.
    IfIcmpge = 0xa2,
    /// Branch if greater than.
    IfIcmpgt = 0xa3,
    /// Branch if less than or equal.
    IfIcmple = 0xa4,
    /// Load integer from a local variable.
    Iload = 0x15,
    /// Load integer from local variable 0.
    Iload0 = 0x1a,
    /// Multiply integers.
    Imul = 0x68,
    /// Invoke virtual method (println).
    Invokevirtual = 0xb6,
    /// Store integer into a local variable.
    Istore = 0x36,
    /// Store integer into local variable 0.
    Istore0 = 0x3b,
    /// Subtract integers.
    Isub = 0x64,
    /// Jump to subroutine.
    Jsr = 0xa8,
    /// Create new array.
    Newarray = 0xbc,
    /// Return from subroutine.
    Ret = 0xa9,
    /// Return from the main program.
    Return = 0xb1,
    /// Push 16-bit constant onto the stack.
    Sipush = 0x11,
}

impl Opcode {
    /// Mnemonic used in trace output.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Aload => "ALOAD",
            Opcode::Aload0 => "ALOAD_0",
            Opcode::Arraylength => "ARRAYLENGTH",
            Opcode::Astore => "ASTORE",
            Opcode::Astore0 => "ASTORE_0",
            Opcode::Bipush => "BIPUSH",
            Opcode::Getstatic => "GETSTATIC",
            Opcode::Goto => "GOTO",
            Opcode::Iadd => "IADD",
            Opcode::Iaload => "IALOAD",
            Opcode::Iastore => "IASTORE",
            Opcode::Iconst0 => "ICONST_0",
            Opcode::Iconst1 => "ICONST_1",
            Opcode::Iconst2 => "ICONST_2",
            Opcode::Iconst3 => "ICONST_3",
            Opcode::Iconst4 => "ICONST_4",
            Opcode::Iconst5 => "ICONST_5",
            Opcode::Idiv => "IDIV",
            Opcode::IfIcmpeq => "IF_ICMPEQ",
            Opcode::IfIcmpne => "IF_ICMPNE",
            Opcode::IfIcmplt => "IF_ICMPLT",
            Opcode::IfIcmpge => "IF_ICMPGE",
            Opcode::IfIcmpgt => "IF_ICMPGT",
            Opcode::IfIcmple => "IF_ICMPLE",
            Opcode::Iload => "ILOAD",
            Opcode::Iload0 => "ILOAD_0",
            Opcode::Imul => "IMUL",
            Opcode::Invokevirtual => "INVOKEVIRTUAL",
            Opcode::Istore => "ISTORE",
            Opcode::Istore0 => "ISTORE_0",
            Opcode::Isub => "ISUB",
            Opcode::Jsr => "JSR",
            Opcode::Newarray => "NEWARRAY",
            Opcode::Ret => "RET",
            Opcode::Return => "RETURN",
            Opcode::Sipush => "SIPUSH",
        }
    }
}

/// Offset of the first generated instruction: everything before it is the
/// fixed [`CLASS_TEMPLATE`].
pub const CODE_START: usize = 0x11c;

/// Offset of the 16-bit code-length field back-filled at finalize time.
pub const CODE_LENGTH_OFFSET: usize = 0x11a;

/// Offset of the 16-bit attribute-length field back-filled at finalize time.
pub const ATTRIBUTE_LENGTH_OFFSET: usize = 0x112;

/// Upper bound on the code attribute; the length fields are 16-bit.
pub const MAX_ATTRIBUTE_LENGTH: usize = 0x10000;

/// Fixed class-file prefix the generated instructions are appended to.
///
/// Magic and version, a 24-entry constant pool (class references,
/// `System.out`, `PrintStream.println(I)V`, the method names), an empty
/// field table, the `<init>` method, and the header of the `run()V`
/// method whose Code attribute receives the generated instruction
/// stream. The `0xff` bytes are the length placeholders rewritten by
/// `finalize`.
pub const CLASS_TEMPLATE: [u8; CODE_START] = [
    0xca, 0xfe, 0xba, 0xbe, 0x00, 0x03, 0x00, 0x2d,
    0x00, 0x18, 0x07, 0x00, 0x11, 0x07, 0x00, 0x12,
    0x07, 0x00, 0x13, 0x07, 0x00, 0x17, 0x0a, 0x00,
    0x02, 0x00, 0x08, 0x09, 0x00, 0x03, 0x00, 0x09,
    0x0a, 0x00, 0x01, 0x00, 0x0a, 0x0c, 0x00, 0x0e,
    0x00, 0x0b, 0x0c, 0x00, 0x15, 0x00, 0x10, 0x0c,
    0x00, 0x16, 0x00, 0x0c, 0x01, 0x00, 0x03, 0x28,
    0x29, 0x56, 0x01, 0x00, 0x04, 0x28, 0x49, 0x29,
    0x56, 0x01, 0x00, 0x16, 0x28, 0x5b, 0x4c, 0x6a,
    0x61, 0x76, 0x61, 0x2f, 0x6c, 0x61, 0x6e, 0x67,
    0x2f, 0x53, 0x74, 0x72, 0x69, 0x6e, 0x67, 0x3b,
    0x29, 0x56, 0x01, 0x00, 0x06, 0x3c, 0x69, 0x6e,
    0x69, 0x74, 0x3e, 0x01, 0x00, 0x04, 0x43, 0x6f,
    0x64, 0x65, 0x01, 0x00, 0x15, 0x4c, 0x6a, 0x61,
    0x76, 0x61, 0x2f, 0x69, 0x6f, 0x2f, 0x50, 0x72,
    0x69, 0x6e, 0x74, 0x53, 0x74, 0x72, 0x65, 0x61,
    0x6d, 0x3b, 0x01, 0x00, 0x13, 0x6a, 0x61, 0x76,
    0x61, 0x2f, 0x69, 0x6f, 0x2f, 0x50, 0x72, 0x69,
    0x6e, 0x74, 0x53, 0x74, 0x72, 0x65, 0x61, 0x6d,
    0x01, 0x00, 0x10, 0x6a, 0x61, 0x76, 0x61, 0x2f,
    0x6c, 0x61, 0x6e, 0x67, 0x2f, 0x4f, 0x62, 0x6a,
    0x65, 0x63, 0x74, 0x01, 0x00, 0x10, 0x6a, 0x61,
    0x76, 0x61, 0x2f, 0x6c, 0x61, 0x6e, 0x67, 0x2f,
    0x53, 0x79, 0x73, 0x74, 0x65, 0x6d, 0x01, 0x00,
    0x04, 0x6d, 0x61, 0x69, 0x6e, 0x01, 0x00, 0x03,
    0x6f, 0x75, 0x74, 0x01, 0x00, 0x07, 0x70, 0x72,
    0x69, 0x6e, 0x74, 0x6c, 0x6e, 0x01, 0x00, 0x03,
    0x72, 0x75, 0x6e, 0x00, 0x21, 0x00, 0x04, 0x00,
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00,
    0x01, 0x00, 0x0e, 0x00, 0x0b, 0x00, 0x01, 0x00,
    0x0f, 0x00, 0x00, 0x00, 0x11, 0x00, 0x01, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x05, 0x2a, 0xb7, 0x00,
    0x05, 0xb1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09,
    0x00, 0x14, 0x00, 0x0d, 0x00, 0x01, 0x00, 0x0f,
    0x00, 0x00, 0x00, 0xff, 0x00, 0x40, 0x01, 0x00,
    0x00, 0x00, 0x00, 0xff,];
