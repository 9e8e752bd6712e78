//! Main library for Mentor, used by its CLI.
//!
//! Mentor explains code and points out common mistakes by matching it
//! against static rule tables, and serves short lessons, quizzes and career
//! guidance from the same tables. A [`completer::Completer`] can be plugged
//! in for answers the tables cannot give.

pub mod completer;
pub mod content;
pub mod language;
pub mod mentor;
pub mod prompt;
pub mod rules;
pub mod snippet;
pub mod store;
pub mod template;
