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

//! Class-file writer for the littlec compiler.
//!
//! The emitter produces a complete image, so writing is a plain dump.
//! The output name is fixed by the embedded constant pool: the class is
//! named `run`, so the JVM will only load it from a file called
//! `run.class`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// The output file name the embedded class name requires.
pub const DEFAULT_OUTPUT: &str = "run.class";

/// The class-file magic number.
const MAGIC: [u8; 4] = [0xca, 0xfe, 0xba, 0xbe];

/// Write a finalized class-file image.
pub fn write_class(image: &[u8], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(image)?;
    Ok(())
}

/// Read a class file back, validating the magic number.
pub fn read_class(path: &Path) -> io::Result<Vec<u8>> {
    let data = std::fs::read(path)?;

    if data.len() < 4 || data[..4] != MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "not a class file",
        ));
    }

    Ok(data)
}
