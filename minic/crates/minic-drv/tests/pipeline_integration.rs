//! Whole-pipeline integration tests through the driver library.

use minic_drv::{compile, render};
use minic_util::ErrorKind;

fn tac_lines(source: &str) -> Vec<String> {
    compile(source)
        .expect("program should compile")
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_sum_chain() {
    assert_eq!(
        tac_lines("int a = 5 + 3 + 2;"),
        ["t0 = 5 + 3", "t1 = t0 + 2", "declareint a", "a = t1"]
    );
}

#[test]
fn test_widening() {
    assert_eq!(
        tac_lines("float a = 1 + 2.0;"),
        ["t0 = toFloat 1", "t1 = t0 + 2.0", "declarefloat a", "a = t1"]
    );
}

#[test]
fn test_multiple_declarations() {
    assert_eq!(
        tac_lines("int a = 5;\nint b = 6;\nint c = a + b;"),
        [
            "declareint a",
            "a = 5",
            "declareint b",
            "b = 6",
            "t0 = a + b",
            "declareint c",
            "c = t0",
        ]
    );
}

#[test]
fn test_while_program_line_count() {
    let lines = tac_lines(
        "bool a = true;\n\
         int i = 0;\n\
         while (a) {\n\
             print(a);\n\
             if (i == 10) { a = false; }\n\
             i = i + 1;\n\
         }\n",
    );
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[4], "LABEL L0");
    assert_eq!(lines[5], "t3 = not a");
    assert_eq!(lines[6], "t3 IFGOTO L2");
    assert_eq!(lines[15], "GOTO L0");
    assert_eq!(lines[16], "LABEL L2");
}

#[test]
fn test_for_program_line_count() {
    let lines = tac_lines(
        "for (int i = 0; i < 9; i = i + 1) { int a = 5; print(a); }\n\
         int i = 2;\n",
    );
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[2], "LABEL L0");
    assert_eq!(lines[12], "LABEL L1");
    assert_eq!(lines[13], "declareint i");
    assert_eq!(lines[14], "i = 2");
}

#[test]
fn test_division_by_zero_is_semantic_error() {
    let err = compile("int x = 1 / 0;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("division by zero"));
    assert_eq!(err.line, 1);
}

#[test]
fn test_illegal_character_is_lex_error() {
    let err = compile("int a = 5 ? 3;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert!(err.message.contains("illegal character '?'"));
}

#[test]
fn test_lex_error_wins_over_parse_error() {
    // The stream also has a syntax problem, but the lexical error aborts
    // the pipeline first.
    let err = compile("int a = @ ;;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
}

#[test]
fn test_scope_violations_are_parse_errors() {
    let err = compile("int a = 1;\nint a = 2;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);

    let err = compile("print(missing);").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
}

#[test]
fn test_type_mismatch_is_semantic_error() {
    let err = compile("int x = true;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err
        .message
        .contains("value of type bool cannot be assigned to int"));
}

#[test]
fn test_no_tac_after_any_error() {
    // An error mid-program yields no instructions at all.
    assert!(compile("int a = 1;\nint b = 1 - \"a\";").is_err());
}

#[test]
fn test_render_is_newline_terminated() {
    let instrs = compile("int a = 2;").unwrap();
    assert_eq!(render(&instrs), "declareint a\na = 2\n");
}

#[test]
fn test_error_render_includes_snippet() {
    let err = compile("int a = 1;\na = true;").unwrap_err();
    let rendered = err.render();
    assert!(rendered.contains("semantic error"));
    assert!(rendered.contains("\t2)\ta = true;"));
}

#[test]
fn test_fresh_compilations_restart_counters() {
    // A second compilation starts numbering from t0/L0 again.
    let first = tac_lines("int a = 1 + 2;");
    let second = tac_lines("int a = 1 + 2;");
    assert_eq!(first, second);
    assert_eq!(first[0], "t0 = 1 + 2");
}
