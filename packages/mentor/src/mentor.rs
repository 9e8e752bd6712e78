//! The caller boundary between the user interface and the core.
//!
//! [`Mentor`] validates what the user submitted, runs the matching core,
//! and turns every expected failure into a [`Notice`]: a short message for
//! the user rather than an error for the process.

use derive_more::Display;
use thiserror::Error;

use crate::{
    completer::{Completer, CompletionError, CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL},
    content::{Answer, Guidance, Lesson, Question, QuizReport},
    prompt,
    rules::{self, DebugRule, Finding},
    snippet::Span,
    store::{Store, TableKind},
};

/// Expected, recoverable problems with a request.
///
/// A malformed rule table is not part of this taxonomy: it is caught while
/// loading the [`Store`], before a `Mentor` can exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MentorError {
    /// The submitted text was empty or whitespace.
    #[error("Please enter some code first.")]
    EmptyInput,

    /// The topic is absent from the table that was consulted.
    #[error("{}", unknown_topic_message(.table, .topic))]
    UnknownTopic { table: TableKind, topic: String },
}

fn unknown_topic_message(table: &TableKind, topic: &str) -> String {
    match table {
        TableKind::Career => format!("Path not found: {topic}."),
        _ => format!("No {table} content for '{topic}'. Pick another topic."),
    }
}

/// Which kind of result came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoMatch {
    #[display("No explanation found.")]
    Explanation,

    #[display("No known issues detected.")]
    Issue,
}

/// A short, non-technical message shown in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// The request could not be served as submitted.
    #[display("{_0}")]
    Rejected(MentorError),

    /// The rules ran but none of them fired.
    #[display("{_0}")]
    NothingFound(NoMatch),

    /// A richer answer was requested but no completer is configured.
    #[display("Detailed answers are not available: no completion service is configured.")]
    CompleterUnavailable,

    /// The completer failed; the user may try again.
    #[display("{_0}")]
    CompletionFailed(CompletionError),
}

impl Notice {
    /// How the notice should be presented.
    pub fn severity(&self) -> Severity {
        match self {
            Notice::NothingFound(NoMatch::Issue) => Severity::Success,
            Notice::NothingFound(NoMatch::Explanation) | Notice::Rejected(_) => Severity::Warning,
            Notice::CompleterUnavailable | Notice::CompletionFailed(_) => Severity::Error,
        }
    }
}

impl From<MentorError> for Notice {
    fn from(error: MentorError) -> Self {
        Notice::Rejected(error)
    }
}

impl From<CompletionError> for Notice {
    fn from(error: CompletionError) -> Self {
        Notice::CompletionFailed(error)
    }
}

/// How a notice is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// What the mentor has to say about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// A result from the static tables.
    Found(T),

    /// Free-form text from the completer.
    Completed(String),

    /// Nothing to show but a message.
    Notice(Notice),
}

impl<T> Reply<T> {
    /// The static result, if there is one.
    pub fn found(self) -> Option<T> {
        match self {
            Reply::Found(found) => Some(found),
            _ => None,
        }
    }

    /// The notice, if there is one.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Reply::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

impl<T> From<Notice> for Reply<T> {
    fn from(notice: Notice) -> Self {
        Reply::Notice(notice)
    }
}

impl<T> From<MentorError> for Reply<T> {
    fn from(error: MentorError) -> Self {
        Reply::Notice(error.into())
    }
}

/// Whether to consult the completer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Depth {
    /// Use the rule tables; fall back to the completer, if configured, only
    /// when they have nothing to say.
    #[default]
    Static,

    /// Go straight to the completer for a richer answer.
    Deep,
}

/// A detected issue and where it first occurs.
#[derive(Debug, Clone)]
pub struct Diagnosis<'s> {
    pub rule: &'s DebugRule,
    pub span: Option<Span>,
}

/// The user-facing entry point to the core.
pub struct Mentor<'s> {
    store: &'s Store,
    completer: Option<Box<dyn Completer + 's>>,
    model: String,
    max_tokens: u32,
}

impl<'s> Mentor<'s> {
    /// A mentor answering from `store` alone.
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            completer: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Defer to `completer` for richer answers.
    pub fn with_completer(mut self, completer: impl Completer + 's) -> Self {
        self.completer = Some(Box::new(completer));
        self
    }

    /// The model and token budget requested from the completer.
    pub fn with_model(mut self, model: impl Into<String>, max_tokens: u32) -> Self {
        self.model = model.into();
        self.max_tokens = max_tokens;
        self
    }

    /// Explain every construct the rule tables recognize in `code`.
    #[tracing::instrument(skip(self, code))]
    pub fn explain(&self, language: &str, code: &str, depth: Depth) -> Reply<Vec<Finding>> {
        if let Err(error) = require_text(code) {
            return error.into();
        }
        if depth == Depth::Deep {
            return self.complete(prompt::explain(language, code));
        }

        let static_reply = if self.store.has_topic(TableKind::Explanations, language) {
            let findings = rules::explain(self.store.explain_rules(language), code);
            if findings.is_empty() {
                Notice::NothingFound(NoMatch::Explanation).into()
            } else {
                Reply::Found(findings)
            }
        } else {
            unknown(TableKind::Explanations, language).into()
        };
        self.fall_back(static_reply, || prompt::explain(language, code))
    }

    /// Report the first known issue in `code`.
    #[tracing::instrument(skip(self, code))]
    pub fn debug(&self, language: &str, code: &str, depth: Depth) -> Reply<Diagnosis<'s>> {
        if let Err(error) = require_text(code) {
            return error.into();
        }
        if depth == Depth::Deep {
            return self.complete(prompt::debug(language, code));
        }

        let static_reply = if self.store.has_topic(TableKind::Debug, language) {
            match rules::diagnose(self.store.debug_rules(language), code) {
                Some(rule) => Reply::Found(Diagnosis {
                    rule,
                    span: rule.locate(code),
                }),
                None => Notice::NothingFound(NoMatch::Issue).into(),
            }
        } else {
            unknown(TableKind::Debug, language).into()
        };
        self.fall_back(static_reply, || prompt::debug(language, code))
    }

    /// Lessons for a topic.
    pub fn lessons(&self, topic: &str) -> Reply<&'s [Lesson]> {
        if self.store.has_topic(TableKind::Lessons, topic) {
            Reply::Found(self.store.lessons(topic))
        } else {
            unknown(TableKind::Lessons, topic).into()
        }
    }

    /// Quiz questions for a topic.
    pub fn quiz(&self, topic: &str) -> Reply<&'s [Question]> {
        if self.store.has_topic(TableKind::Quiz, topic) {
            Reply::Found(self.store.questions(topic))
        } else {
            unknown(TableKind::Quiz, topic).into()
        }
    }

    /// Score `answers` against the quiz for a topic.
    pub fn grade(&self, topic: &str, answers: &[Answer]) -> Reply<QuizReport> {
        match self.quiz(topic) {
            Reply::Found(questions) => Reply::Found(QuizReport::grade(questions, answers)),
            Reply::Completed(text) => Reply::Completed(text),
            Reply::Notice(notice) => Reply::Notice(notice),
        }
    }

    /// Guidance for a career path.
    pub fn career(&self, path: &str) -> Reply<&'s Guidance> {
        match self.store.guidance(path) {
            Some(guidance) => Reply::Found(guidance),
            None => unknown(TableKind::Career, path).into(),
        }
    }

    fn complete<T>(&self, prompt: String) -> Reply<T> {
        let Some(completer) = &self.completer else {
            return Notice::CompleterUnavailable.into();
        };
        let request = CompletionRequest::builder()
            .prompt(prompt)
            .model(&self.model)
            .max_tokens(self.max_tokens)
            .build();
        match completer.complete(&request) {
            Ok(text) => Reply::Completed(text),
            Err(error) => {
                tracing::warn!(%error, "completion failed");
                Notice::from(error).into()
            }
        }
    }

    fn fall_back<T>(&self, reply: Reply<T>, prompt: impl FnOnce() -> String) -> Reply<T> {
        match reply {
            Reply::Notice(Notice::NothingFound(_) | Notice::Rejected(MentorError::UnknownTopic { .. }))
                if self.completer.is_some() =>
            {
                tracing::debug!("rules had nothing to say, deferring to completer");
                self.complete(prompt())
            }
            reply => reply,
        }
    }
}

fn require_text(text: &str) -> Result<(), MentorError> {
    if text.trim().is_empty() {
        Err(MentorError::EmptyInput)
    } else {
        Ok(())
    }
}

fn unknown(table: TableKind, topic: &str) -> MentorError {
    MentorError::UnknownTopic {
        table,
        topic: topic.to_string(),
    }
}
