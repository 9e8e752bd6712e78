//! Lesson, Quiz and Career Tests

use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::run_mentor;

#[test]
fn test_lessons() {
    let run = run_mentor(&["lessons", "--language", "javascript"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Equality"), "got: {}", run.stdout);
    assert!(run.stdout.contains("`===`"), "got: {}", run.stdout);
}

#[test]
fn test_lessons_unknown_language() {
    let run = run_mentor(&["lessons", "--language", "cobol"]);
    pretty_assert_eq!(run.exit_code, 0);
    assert!(run.stdout.contains("No lesson content for 'cobol'"), "got: {}", run.stdout);
}

#[test]
fn test_quiz_lists_questions() {
    let run = run_mentor(&["quiz"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Which keyword defines a function?"), "got: {}", run.stdout);
    assert!(run.stdout.contains("2) def"), "got: {}", run.stdout);
}

#[test]
fn test_quiz_grades_answers() {
    let run = run_mentor(&["quiz", "--answer", "2", "--answer", "1"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    pretty_assert_eq!(run.stdout.matches("Correct!").count(), 1, "got: {}", run.stdout);
    pretty_assert_eq!(run.stdout.matches("Try again.").count(), 1, "got: {}", run.stdout);
    assert!(run.stdout.contains("Score: 1/4"), "got: {}", run.stdout);
}

#[test]
fn test_quiz_rejects_zero_answer() {
    let run = run_mentor(&["quiz", "--answer", "0"]);
    assert_ne!(run.exit_code, 0);
}

#[test]
fn test_career() {
    let run = run_mentor(&["career", "backend"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("SQL"), "got: {}", run.stdout);
    assert!(run.stdout.contains("Advice:"), "got: {}", run.stdout);
}

#[test]
fn test_career_unknown_path() {
    let run = run_mentor(&["career", "astronaut"]);
    pretty_assert_eq!(run.exit_code, 0);
    assert!(run.stdout.contains("Path not found: astronaut."), "got: {}", run.stdout);
}

#[test]
fn test_career_lists_paths() {
    let run = run_mentor(&["career"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("backend, data, frontend"), "got: {}", run.stdout);
}

#[test]
fn test_topics() {
    let run = run_mentor(&["topics"]);
    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert!(run.stdout.contains("javascript, python"), "got: {}", run.stdout);
    assert!(run.stdout.contains("backend, data, frontend"), "got: {}", run.stdout);
}
