//! Source code snippet rendering for findings.
//!
//! Uses `annotate-snippets` to render compiler-like output, pointing to the
//! exact location in the submitted code that each finding refers to.

use std::ops::Range;

use annotate_snippets::{Level, Renderer, Snippet};
use bon::Builder;
use derive_more::AsRef;

/// Source code to be annotated.
#[derive(Debug, Clone, PartialEq, Eq, AsRef)]
pub struct Source(String);

/// How an annotated snippet is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral explanations of what the code does.
    Explain,

    /// A likely problem in the code.
    Warn,
}

impl Source {
    /// Annotate the source code with the given annotations.
    ///
    /// # Examples
    ///
    /// Produces output similar to Rust compiler diagnostics:
    ///
    /// ```text
    /// info: What this code does
    ///   |
    /// 1 | def foo():
    ///   | ^^^^^^^ Defines a function named foo
    ///   |
    /// ```
    pub fn annotate(
        &self,
        tone: Tone,
        annotations: impl IntoIterator<Item = impl Into<Annotation>>,
    ) -> String {
        // `annotate_snippets` borrows its labels, so the owned annotations
        // have to outlive the rendered message.
        let annotations = annotations.into_iter().map(Into::into).collect::<Vec<_>>();
        let level = match tone {
            Tone::Explain => Level::Info,
            Tone::Warn => Level::Warning,
        };
        let title = match (tone, annotations.len()) {
            (Tone::Explain, _) => "What this code does",
            (Tone::Warn, 1) => "Possible issue found",
            (Tone::Warn, _) => "Possible issues found",
        };

        let annotations = annotations
            .iter()
            .map(|Annotation { span, label }| level.span(span.range()).label(label));
        let snippet = Snippet::source(self.0.as_ref())
            .fold(true)
            .annotations(annotations);
        let message = level.title(title).snippet(snippet);
        Renderer::plain().render(message).to_string()
    }
}

impl<S: Into<String>> From<S> for Source {
    fn from(source: S) -> Self {
        Self(source.into())
    }
}

/// An annotation on a source code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Annotation {
    /// The byte range of the annotation.
    #[builder(into)]
    pub span: Span,

    /// The label of the annotation.
    #[builder(into, default = Annotation::DEFAULT_LABEL)]
    pub label: String,
}

impl Annotation {
    /// The default label for an annotation if created without a label.
    pub const DEFAULT_LABEL: &str = "matched here";
}

impl<S: Into<Span>, L: Into<String>> From<(S, L)> for Annotation {
    fn from((span, label): (S, L)) -> Self {
        Self {
            span: span.into(),
            label: label.into(),
        }
    }
}

/// A byte range in source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,

    /// End byte offset.
    pub end: usize,
}

impl Span {
    /// View the span as a `Range<usize>`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A single occurrence of a rule's pattern in submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Match {
    /// The byte range of the whole match.
    #[builder(into)]
    pub span: Span,

    /// The text substituted into a message template: the first capture group
    /// if the pattern has one, otherwise the whole match.
    #[builder(into)]
    pub capture: String,
}
