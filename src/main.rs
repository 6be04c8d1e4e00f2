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

//! littlec Compiler CLI
//!
//! Compiles LITTLE source files into runnable JVM class files.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use littlec::output::DEFAULT_OUTPUT;
use littlec::Session;

/// littlec - A compiler for the LITTLE teaching language
#[derive(Parser, Debug)]
#[command(name = "littlec")]
#[command(version)]
#[command(about = "A compiler for the LITTLE teaching language, targeting the JVM")]
#[command(long_about = r#"
littlec compiles a LITTLE source file into a class file the JVM can run
directly. The generated class is always named `run`, so keep the default
output name and start the program with:

  littlec hello.lit
  java run

A debug trace of the token windows, every emitted instruction and the
final symbol/literal tables can be written alongside:

  littlec hello.lit --debug
  littlec hello.lit --debug --debug-log trace.txt
"#)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Output class file. The embedded class name requires `run.class`.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Write a compilation trace log
    #[arg(short, long)]
    debug: bool,

    /// Where to write the trace log
    #[arg(long, default_value = "debug.txt")]
    debug_log: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        println!("littlec v{}", littlec::VERSION);
        println!("Source: {}", cli.source.display());
        println!("Output: {}", cli.output.display());
    }

    let mut session = if cli.debug {
        let sink = match File::create(&cli.debug_log) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error: Cannot create {}: {}", cli.debug_log.display(), e);
                return ExitCode::from(3);
            }
        };
        if cli.verbose {
            println!("Trace log: {}", cli.debug_log.display());
        }
        Session::with_sink(Box::new(sink))
    } else {
        Session::new()
    };

    match littlec::compile_file(&cli.source, &cli.output, &mut session) {
        Ok(()) => {
            println!("Compiled {} -> {}", cli.source.display(), cli.output.display());
            ExitCode::SUCCESS
        }
        Err(littlec::Error::Compile(e)) => {
            eprintln!("Error on line {}: {}", e.line, e.message);
            ExitCode::from(1)
        }
        Err(littlec::Error::Io(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::from(3)
        }
    }
}
