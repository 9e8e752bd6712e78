//! Data Directory Tests

use std::fs;
use std::path::Path;

use indoc::indoc;
use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{run_mentor, run_mentor_with};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write table file");
}

fn custom_data() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(
        dir.path(),
        "code_explanations.yaml",
        indoc! {r#"
            rust:
              - key: function
                pattern: "fn\\s+(\\w+)"
                explanation: "Declares the function {}"
        "#},
    );
    dir
}

#[test]
fn test_data_flag_replaces_builtin_tables() {
    let dir = custom_data();
    let data = dir.path().to_string_lossy().to_string();

    let run = run_mentor(&["--data", &data, "explain", "--language", "rust", "fn main() {}"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Declares the function main"), "got: {}", run.stdout);

    let run = run_mentor(&["--data", &data, "explain", "def foo(): pass"]);
    assert!(
        run.stdout.contains("No explanation content for 'python'"),
        "got: {}",
        run.stdout
    );
}

#[test]
fn test_data_env_var() {
    let dir = custom_data();
    let data = dir.path().to_string_lossy().to_string();

    let run = run_mentor_with(
        &["explain", "--language", "rust", "fn main() {}"],
        &[("MENTOR_DATA", &data)],
    );
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Declares the function main"), "got: {}", run.stdout);
}

#[test]
fn test_validate_prints_tables() {
    let dir = custom_data();
    let data = dir.path().to_string_lossy().to_string();

    let run = run_mentor(&["validate", &data]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("rust:"), "got: {}", run.stdout);
    assert!(run.stdout.contains("Declares the function {}"), "got: {}", run.stdout);
}

#[test]
fn test_validate_builtin_tables() {
    let run = run_mentor(&["validate"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("infinite_loop"), "got: {}", run.stdout);
}

#[test]
fn test_malformed_template_fails_startup() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(
        dir.path(),
        "code_explanations.json",
        r#"{ "python": [ { "key": "broken", "pattern": "def\\s+\\w+", "explanation": "{} and {}" } ] }"#,
    );
    let data = dir.path().to_string_lossy().to_string();

    for args in [
        vec!["validate", data.as_str()],
        vec!["--data", data.as_str(), "explain", "def foo(): pass"],
    ] {
        let run = run_mentor(&args);
        assert_ne!(run.exit_code, 0, "malformed tables must fail: {args:?}");
        assert!(
            run.stderr.contains("malformed entry 'broken' for topic 'python'"),
            "got: {}",
            run.stderr
        );
    }
}
