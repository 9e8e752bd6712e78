//! Debug Command Tests

use pretty_assertions::assert_eq as pretty_assert_eq;
use simple_test_case::test_case;

use crate::run_mentor;

#[test_case("python", "while True:\n    pass", "infinite_loop"; "python infinite loop")]
#[test_case("python", "try:\n    run()\nexcept:\n    pass", "bare_except"; "python bare except")]
#[test_case("python", "if x == None:\n    pass", "none_comparison"; "python none comparison")]
#[test_case("javascript", "if (a == b) {}", "loose_equality"; "javascript loose equality")]
#[test]
fn test_debug(language: &str, code: &str, expected: &str) {
    let run = run_mentor(&["debug", "--language", language, code]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains(expected), "expected {expected}, got: {}", run.stdout);
}

#[test]
fn test_debug_reports_only_first_issue() {
    let code = "while True:\n    try:\n        work()\n    except:\n        pass";
    let run = run_mentor(&["debug", code]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("infinite_loop"), "got: {}", run.stdout);
    assert!(!run.stdout.contains("bare_except"), "got: {}", run.stdout);
}

#[test]
fn test_debug_clean_code() {
    let run = run_mentor(&["debug", "x = 1"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("No known issues detected."), "got: {}", run.stdout);
}

#[test]
fn test_debug_annotate() {
    let run = run_mentor(&["debug", "--annotate", "while True:\n    pass"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Possible issue found"), "got: {}", run.stdout);
    assert!(run.stdout.contains("^^^^^^^^^^"), "got: {}", run.stdout);
}
