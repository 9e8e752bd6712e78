//! Rule data types and matching.

use thiserror::Error;

pub use eval::*;
pub use schema::*;

use crate::{store::TableKind, template::TemplateError};

mod eval;
mod schema;

/// What is wrong with a single table entry.
#[derive(Debug, Error)]
pub enum RuleDefect {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern")]
    Pattern(#[source] regex::Error),

    /// The message template is inconsistent with a single substitution.
    #[error("invalid message template")]
    Template(#[source] TemplateError),

    /// A quiz question names an answer that is not among its options.
    #[error("answer index {answer} is out of range for {options} options")]
    AnswerOutOfRange { answer: usize, options: usize },
}

/// A table entry that failed validation while loading the store.
///
/// A malformed entry is a deployment defect: it aborts loading of the whole
/// store instead of being skipped.
#[derive(Debug, Error)]
#[error("malformed entry '{key}' for topic '{topic}' in the {table} table")]
pub struct MalformedRule {
    pub table: TableKind,
    pub topic: String,
    pub key: String,
    #[source]
    pub defect: RuleDefect,
}
