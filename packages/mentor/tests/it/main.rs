//! Integration tests for the `mentor` binary.
//!
//! These tests drive the CLI end to end:
//! - Code is explained and debugged against the built-in tables
//! - Lessons, quizzes and career guidance are looked up by topic
//! - Data directories replace the built-in tables, and malformed ones fail

mod completer;
mod content;
mod data;
mod debug;
mod explain;

use xshell::{Shell, cmd};

/// Output of a single `mentor` run.
#[derive(Debug)]
pub struct Run {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `mentor` with the given arguments and no completer configured.
pub fn run_mentor(args: &[&str]) -> Run {
    run_mentor_with(args, &[])
}

/// Run `mentor` with the given arguments and extra environment variables.
pub fn run_mentor_with(args: &[&str], env: &[(&str, &str)]) -> Run {
    let sh = Shell::new().expect("create shell");
    let mut command = cmd!(sh, "cargo run --quiet -p mentor -- {args...}")
        .env_remove("MENTOR_COMPLETER")
        .env_remove("MENTOR_API_KEY")
        .env_remove("MENTOR_DATA")
        .env_remove("MENTOR_LOG")
        .stdin("")
        .ignore_status();
    for (key, value) in env {
        command = command.env(key, value);
    }

    let output = command.output().expect("failed to run mentor");
    Run {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
