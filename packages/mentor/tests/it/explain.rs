//! Explain Command Tests

use std::fs;

use pretty_assertions::assert_eq as pretty_assert_eq;
use simple_test_case::test_case;

use crate::run_mentor;

#[test_case("python", "def foo():\n    pass", "Defines a function named foo"; "python function")]
#[test_case("python", "import os", "Imports the module os"; "python import")]
#[test_case("javascript", "const total = 1;", "Declares a constant named total"; "javascript const")]
#[test_case("Python", "class Dog:\n    pass", "Defines a class named Dog"; "language is case insensitive")]
#[test]
fn test_explain(language: &str, code: &str, expected: &str) {
    let run = run_mentor(&["explain", "--language", language, code]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(
        run.stdout.contains(expected),
        "expected {expected:?}, got: {}",
        run.stdout
    );
}

#[test]
fn test_explain_defaults_to_python() {
    let run = run_mentor(&["explain", "def greet(name):\n    return name"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Defines a function named greet"), "got: {}", run.stdout);
    assert!(run.stdout.contains("Returns the value of name"), "got: {}", run.stdout);
}

#[test]
fn test_explain_nothing_found() {
    let run = run_mentor(&["explain", "42"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("No explanation found."), "got: {}", run.stdout);
}

#[test]
fn test_explain_unknown_language() {
    let run = run_mentor(&["explain", "--language", "cobol", "MOVE A TO B."]);
    pretty_assert_eq!(run.exit_code, 0, "unknown topics are not errors");
    assert!(
        run.stdout.contains("No explanation content for 'cobol'"),
        "got: {}",
        run.stdout
    );
}

#[test]
fn test_explain_blank_code() {
    let run = run_mentor(&["explain", "   "]);
    pretty_assert_eq!(run.exit_code, 0);
    assert!(run.stdout.contains("Please enter some code first."), "got: {}", run.stdout);
}

#[test]
fn test_explain_annotate() {
    let run = run_mentor(&["explain", "--annotate", "def foo():\n    pass"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("What this code does"), "got: {}", run.stdout);
    assert!(run.stdout.contains("def foo():"), "got: {}", run.stdout);
    assert!(run.stdout.contains("^^^^^^^"), "got: {}", run.stdout);
}

#[test]
fn test_explain_file_infers_language() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("app.js");
    fs::write(&path, "let count = 0;\n").expect("write source file");
    let path = path.to_string_lossy().to_string();

    let run = run_mentor(&["explain", "--file", &path]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(
        run.stdout.contains("Declares a block-scoped variable named count"),
        "got: {}",
        run.stdout
    );
}

#[test]
fn test_explain_missing_file() {
    let run = run_mentor(&["explain", "--file", "does-not-exist.py"]);
    assert_ne!(run.exit_code, 0);
    assert!(run.stderr.contains("read code from"), "got: {}", run.stderr);
}
