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

//! End-to-end CLI integration tests.

use std::process::Command;

use tempfile::tempdir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_littlec"))
}

const HELLO: &str = "program hello;\nvar x;\nx := 6 * 7;\nwrite x;\nendprogram\n";

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("littlec"));
    assert!(stdout.contains("-o") || stdout.contains("--output"));
    assert!(stdout.contains("--debug"));
    assert!(stdout.contains("-v") || stdout.contains("--verbose"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("littlec"));
    assert!(stdout.contains("0.1.0"));
}

/// Test compiling a program to a class file.
#[test]
fn test_compile_to_class_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source_path = dir.path().join("hello.lit");
    let output_path = dir.path().join("run.class");

    std::fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Compilation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_path.exists(), "Output file not created");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compiled"));
    assert!(stdout.contains("->"));

    // Verify class-file structure: magic number plus the fixed template.
    let data = std::fs::read(&output_path).unwrap();
    assert!(data.len() > 0x11c, "Class file too small");
    assert_eq!(&data[..4], &[0xca, 0xfe, 0xba, 0xbe], "Class-file magic");
}

/// Test verbose flag.
#[test]
fn test_verbose_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source_path = dir.path().join("verbose.lit");
    let output_path = dir.path().join("run.class");

    std::fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg("-v")
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("littlec v"));
    assert!(stdout.contains("Source:"));
    assert!(stdout.contains("Output:"));
}

/// Test that --debug writes a trace log.
#[test]
fn test_debug_trace_log() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source_path = dir.path().join("traced.lit");
    let output_path = dir.path().join("run.class");
    let log_path = dir.path().join("trace.txt");

    std::fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--debug")
        .arg("--debug-log")
        .arg(&log_path)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Compilation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(log_path.exists(), "Trace log not created");

    let trace = std::fs::read_to_string(&log_path).unwrap();
    assert!(trace.contains("Parser - Advance called"));
    assert!(trace.contains("Emitter - Emit"));
    assert!(trace.contains("Symbol Table Output"));
    assert!(trace.contains("Literal Table Output"));
}

/// Test compile error reporting.
#[test]
fn test_compile_error_reporting() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source_path = dir.path().join("broken.lit");

    std::fs::write(
        &source_path,
        "program broken;\nvar x;\nx := undefined;\nendprogram\n",
    )
    .unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(dir.path().join("run.class"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error on line 3"));
    assert!(stderr.contains("Reference to undefined symbol"));
}

/// Test error on missing source file.
#[test]
fn test_missing_source_file() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = cargo_bin()
        .arg(dir.path().join("nonexistent.lit"))
        .arg("-o")
        .arg(dir.path().join("run.class"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

/// Test exit codes.
#[test]
fn test_exit_codes() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source_path = dir.path().join("exit.lit");
    let output_path = dir.path().join("run.class");

    // Success case
    std::fs::write(&source_path, HELLO).unwrap();
    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    // Compilation error case
    std::fs::write(&source_path, "write 1;\n").unwrap();
    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    // File not found case
    let output = cargo_bin()
        .arg(dir.path().join("missing.lit"))
        .arg("-o")
        .arg(&output_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}
