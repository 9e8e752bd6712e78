//! Completer Tests
//!
//! The completer is an external command; these tests stand one in with `sh`.

use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{run_mentor, run_mentor_with};

#[test]
fn test_deep_without_completer() {
    let run = run_mentor(&["explain", "--deep", "def foo(): pass"]);
    pretty_assert_eq!(run.exit_code, 0);
    assert!(
        run.stdout.contains("no completion service is configured"),
        "got: {}",
        run.stdout
    );
}

#[cfg(unix)]
#[test]
fn test_no_match_falls_back_to_completer() {
    let run = run_mentor_with(
        &["explain", "42"],
        &[
            ("MENTOR_COMPLETER", "sh -c 'cat > /dev/null; echo It is the number 42.'"),
            ("MENTOR_API_KEY", "test-key"),
        ],
    );
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("It is the number 42."), "got: {}", run.stdout);
}

#[cfg(unix)]
#[test]
fn test_completer_receives_model_options() {
    let run = run_mentor_with(
        &["debug", "--deep", "--model", "tiny", "--max-tokens", "64", "x = 1"],
        &[
            ("MENTOR_COMPLETER", r#"sh -c 'cat > /dev/null; echo "$@"' completer"#),
            ("MENTOR_API_KEY", "test-key"),
        ],
    );
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("--model tiny --max-tokens 64"), "got: {}", run.stdout);
}

#[cfg(unix)]
#[test]
fn test_missing_api_key() {
    let run = run_mentor_with(
        &["explain", "--deep", "def foo(): pass"],
        &[("MENTOR_COMPLETER", "sh -c 'echo unused'")],
    );
    pretty_assert_eq!(run.exit_code, 0, "completer failures are not fatal");
    assert!(run.stdout.contains("Set MENTOR_API_KEY"), "got: {}", run.stdout);
}

#[cfg(unix)]
#[test]
fn test_rate_limited() {
    let run = run_mentor_with(
        &["explain", "--deep", "def foo(): pass"],
        &[
            ("MENTOR_COMPLETER", "sh -c 'cat > /dev/null; echo 429 Too Many Requests >&2; exit 1'"),
            ("MENTOR_API_KEY", "test-key"),
        ],
    );
    pretty_assert_eq!(run.exit_code, 0, "completer failures are not fatal");
    assert!(run.stdout.contains("rate limited"), "got: {}", run.stdout);
}
