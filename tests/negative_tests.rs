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

//! Negative/Error tests for the littlec compiler.
//!
//! These tests verify that the compiler rejects invalid programs with the
//! exact diagnostic a user will see.

use test_case::test_case;

fn compile_err(source: &str) -> littlec::CompileError {
    littlec::compile(source).expect_err("expected a compile error")
}

// ============================================================================
// Scanner Errors
// ============================================================================

#[test_case("program p; var x; x := 1 ? 2; endprogram"; "question_mark")]
#[test_case("program p; var x; x := 1 & 2; endprogram"; "ampersand")]
#[test_case("program p; var x; x :- 1; endprogram"; "unknown_two_char_pair")]
fn test_illegal_operator(source: &str) {
    assert_eq!(compile_err(source).message, "Illegal operator");
}

#[test_case("program p; const a = 09; endprogram"; "octal_with_digit_nine")]
#[test_case("program p; const a = 12ab; endprogram"; "decimal_with_hex_letters")]
#[test_case("program p; const a = 9999999999; endprogram"; "overflows_integer")]
fn test_invalid_literal(source: &str) {
    assert_eq!(compile_err(source).message, "Invalid literal");
}

// ============================================================================
// Program Structure Errors
// ============================================================================

#[test_case("var x; endprogram"; "missing_program_keyword")]
#[test_case("program ; endprogram"; "missing_program_name")]
#[test_case("program p endprogram"; "missing_header_semicolon")]
fn test_illegal_program_definition(source: &str) {
    assert_eq!(compile_err(source).message, "Illegal program definition");
}

#[test_case(
    "program p; var x; if x < 1 then x := 1; endwhile; endprogram";
    "endwhile_closes_if"
)]
#[test_case(
    "program p; var x; while x < 1 do x := 1; endif; endprogram";
    "endif_closes_while"
)]
#[test_case("program p; endif; endprogram"; "stray_endif")]
fn test_structure_mismatch(source: &str) {
    assert_eq!(
        compile_err(source).message,
        "Structure type does not match control block"
    );
}

#[test]
fn test_unterminated_program_hits_end_of_file() {
    let err = compile_err("program p; var x; x := 1");
    assert_eq!(
        err.message,
        "Token passed to code generator is not a valid type"
    );
}

#[test]
fn test_statement_without_semicolon() {
    let err = compile_err("program p; var x; x := 5 write x; endprogram");
    assert_eq!(err.message, "Invalid code generator function call");
}

// ============================================================================
// Declaration Errors
// ============================================================================

#[test_case("program p; const a = 1, a = 2; endprogram"; "const_twice")]
#[test_case("program p; var x, x; endprogram"; "var_twice")]
#[test_case("program p; const a = 1; var a; endprogram"; "const_then_var")]
#[test_case(
    "program p;\nproc a;\nwrite 1;\nendproc;\nproc a;\nwrite 2;\nendproc;\ncall a;\nendprogram";
    "proc_twice"
)]
fn test_symbol_already_defined(source: &str) {
    assert_eq!(compile_err(source).message, "Symbol has already been defined");
}

#[test_case("program p; var a[0]; endprogram"; "size_zero")]
#[test_case("program p; var a[101]; endprogram"; "size_above_limit")]
#[test_case("program p; var x, a[x]; endprogram"; "size_not_a_literal")]
fn test_illegal_array_declaration(source: &str) {
    assert_eq!(compile_err(source).message, "Illegal array declaration");
}

#[test]
fn test_stray_operator_in_const_declarations() {
    let err = compile_err("program p; const a := 1; endprogram");
    assert_eq!(
        err.message,
        "Invalid operator found in constant declarations"
    );
}

#[test]
fn test_stray_operator_in_var_declarations() {
    let err = compile_err("program p; var x := 1; endprogram");
    assert_eq!(
        err.message,
        "Invalid operator found in variable declarations"
    );
}

// ============================================================================
// Statement Errors
// ============================================================================

#[test_case("program p; var x; x := q; endprogram"; "undefined_in_expression")]
#[test_case("program p; y := 1; endprogram"; "undefined_assignment_target")]
fn test_reference_to_undefined_symbol(source: &str) {
    assert_eq!(compile_err(source).message, "Reference to undefined symbol");
}

#[test]
fn test_const_is_immutable() {
    let err = compile_err("program p; const c = 4; c := 1; endprogram");
    assert_eq!(err.message, "Cannot change the value of a const symbol");
}

#[test]
fn test_subscript_requires_array() {
    let err = compile_err("program p; var x, y; y := x[0]; endprogram");
    assert_eq!(err.message, "Subscript given for non-array symbol");
}

#[test_case("program p; var x; if x != 1 then x := 0; endif; endprogram"; "in_if")]
#[test_case("program p; var x; while x != 1 do x := 0; endwhile; endprogram"; "in_while")]
fn test_invalid_relational_operator(source: &str) {
    // `!=` scans as an operator but is not a comparison the condition
    // compiler accepts; `<>` is the supported inequality.
    assert_eq!(compile_err(source).message, "Invalid relational operator");
}

// ============================================================================
// Procedure Errors
// ============================================================================

#[test]
fn test_forward_call_never_defined() {
    let err = compile_err("program p;\nproc a;\ncall b;\nendproc;\ncall a;\nendprogram");
    assert_eq!(err.message, "Symbol is referenced but was not defined");
}

#[test]
fn test_call_without_procedure_name() {
    let err = compile_err("program p;\nproc a;\nwrite 1;\nendproc;\ncall ;\nendprogram");
    assert_eq!(err.message, "No symbol name provided for procedure call");
}

#[test]
fn test_call_missing_semicolon() {
    let err = compile_err("program p;\nproc a;\nwrite 1;\nendproc;\ncall a endprogram");
    assert_eq!(err.message, "No semicolon found following procedure call");
}

#[test]
fn test_proc_missing_semicolon() {
    let err = compile_err("program p;\nproc a write 1;\nendproc;\ncall a;\nendprogram");
    assert_eq!(
        err.message,
        "No semicolon found following procedure definition"
    );
}

#[test]
fn test_end_keyword_missing_semicolon() {
    let err =
        compile_err("program p; var x; if x < 1 then x := 2; endif write x; endprogram");
    assert_eq!(
        err.message,
        "No semicolon found following end of control block"
    );
}

// ============================================================================
// Size Limit
// ============================================================================

#[test]
fn test_program_too_long_to_compile() {
    // Each statement costs 17 bytes of bytecode; 4000 of them overflow the
    // 16-bit attribute-length field.
    let mut source = String::from("program p;\n");
    for _ in 0..4000 {
        source.push_str("write 40000;\n");
    }
    source.push_str("endprogram\n");

    let err = compile_err(&source);
    assert_eq!(err.message, "Program is too long to compile");
}

// ============================================================================
// Diagnostic Metadata
// ============================================================================

#[test]
fn test_line_numbers_track_the_failure() {
    let err = compile_err("program p;\nvar x;\nx := 1;\nx := q;\nendprogram");
    assert_eq!(err.message, "Reference to undefined symbol");
    assert_eq!(err.line, 4);
}

#[test]
fn test_display_includes_line() {
    let err = compile_err("program p;\ny := 1;\nendprogram");
    assert_eq!(err.to_string(), "Reference to undefined symbol (line 2)");
}
