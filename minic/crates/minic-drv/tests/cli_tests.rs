//! End-to-end tests for the `minic` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn minic() -> Command {
    Command::cargo_bin("minic").expect("minic binary should build")
}

fn write_source(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("test source should be writable");
    path
}

#[test]
fn test_compiles_to_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "prog.ml", "int a = 5 + 3;\nprint(a);\n");

    minic().arg(&input).assert().success();

    let output = dir.path().join("prog.tac");
    let tac = std::fs::read_to_string(output).expect("default output should exist");
    assert_eq!(tac, "t0 = 5 + 3\ndeclareint a\na = t0\nprint a\n");
}

#[test]
fn test_explicit_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "prog.ml", "bool b = true;\n");
    let output = dir.path().join("out.txt");

    minic().arg(&input).arg("-o").arg(&output).assert().success();

    let tac = std::fs::read_to_string(output).unwrap();
    assert_eq!(tac, "declarebool b\nb = True\n");
}

#[test]
fn test_emit_tac_prints_numbered_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "prog.ml", "int a = 2;\n");

    minic()
        .arg(&input)
        .arg("--emit-tac")
        .assert()
        .success()
        .stdout("0) declareint a\n1) a = 2\n");

    // Nothing is written beside the input in emit mode.
    assert!(!dir.path().join("prog.tac").exists());
}

#[test]
fn test_compile_error_exits_one_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "bad.ml", "int x = 1 / 0;\n");

    minic()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("division by zero"))
        .stderr(predicate::str::contains("int x = 1 / 0;"));
}

#[test]
fn test_parse_error_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "bad.ml", "int a = 5;\nint a = 6;\n");

    minic()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"))
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_missing_input_exits_one() {
    minic()
        .arg("no-such-file.ml")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_verbose_dumps_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "prog.ml", "int a = 1;\n");

    minic()
        .arg(&input)
        .arg("--emit-tac")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("tokens:"))
        .stderr(predicate::str::contains("IntDcl a"))
        .stderr(predicate::str::contains("scope 0 (root):"));
}
