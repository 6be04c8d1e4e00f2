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

//! littlec Compiler Library
//!
//! This library compiles LITTLE source code into runnable JVM class files
//! in a single pass: there is no AST, the parser drives the code generator
//! directly through a dispatch table keyed on pairs of adjacent operator
//! tokens.
//!
//! # Modules
//!
//! - [`error`] - Error types for compile and I/O failures
//! - [`session`] - Line tracking and the optional debug trace sink
//! - [`scanner`] - Tokenization of source code
//! - [`parser`] - Table-driven parsing and code generation
//! - [`symtab`] - Symbol, literal and control-structure bookkeeping
//! - [`emitter`] - Bytecode assembly into the class-file template
//! - [`output`] - Class-file writing
//!
//! # Example
//!
//! ```no_run
//! let source = r#"
//! program demo;
//! var x;
//! x := 6 * 7;
//! write x;
//! endprogram
//! "#;
//!
//! match littlec::compile(source) {
//!     Ok(image) => println!("Generated a {} byte class file", image.len()),
//!     Err(e) => eprintln!("Compilation error: {}", e),
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod session;
pub mod symtab;

// Re-export commonly used types
pub use error::{CompileError, Error, Result};
pub use scanner::{Token, TokenKind};
pub use session::Session;

use std::path::Path;

/// The version of the littlec compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "littlec";

/// Compile LITTLE source code to a class-file image.
///
/// This is the main entry point. It returns the complete class file as a
/// byte vector; pair it with [`output::write_class`] to produce a file the
/// JVM can run.
pub fn compile(source: &str) -> Result<Vec<u8>> {
    let mut session = Session::new();
    compile_with_session(source, &mut session)
}

/// Compile with an explicit [`Session`], e.g. to capture the debug trace.
pub fn compile_with_session(source: &str, session: &mut Session) -> Result<Vec<u8>> {
    let result = parser::compile(source, session);
    session.flush();
    result
}

/// Compile a source file and write the class file next to it.
///
/// The output path should end in `run.class`; the class name embedded in
/// the template fixes what the JVM will accept.
pub fn compile_file(source: &Path, output: &Path, session: &mut Session) -> std::result::Result<(), Error> {
    let text = std::fs::read_to_string(source)?;
    let image = compile_with_session(&text, session)?;
    output::write_class(&image, output)?;
    Ok(())
}
