//! Message templates for explanation rules.
//!
//! A template carries exactly one positional placeholder, written either as
//! `{}` or `{0}`. Literal braces are escaped by doubling them (`{{`, `}}`).
//! Templates are validated when they are parsed, so a template that made it
//! into a loaded rule table can always be rendered.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A problem with the shape of a message template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template has no placeholder for the matched text.
    #[error("template has no placeholder; expected exactly one `{{}}` or `{{0}}`")]
    NoPlaceholder,

    /// The template declares more than one placeholder.
    #[error("template declares {count} placeholders; expected exactly one")]
    TooManyPlaceholders { count: usize },

    /// The placeholder refers to a value the match never provides.
    #[error("placeholder `{{{index}}}` is out of range; a match provides only `{{0}}`")]
    PositionOutOfRange { index: usize },

    /// A placeholder contains something other than an index.
    #[error("placeholder at byte {offset} must be empty or a number")]
    InvalidPlaceholder { offset: usize },

    /// A `{` was opened but never closed.
    #[error("placeholder opened at byte {offset} is never closed")]
    Unterminated { offset: usize },

    /// A `}` appears without a matching `{` and is not escaped.
    #[error("single `}}` at byte {offset}; write `}}}}` for a literal brace")]
    UnmatchedBrace { offset: usize },
}

/// A validated message template with a single substitution slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    before: String,
    after: String,
}

impl Template {
    /// Parse and validate a template.
    ///
    /// ```
    /// use mentor::template::Template;
    ///
    /// let template = Template::parse("Defines a function named {0}").unwrap();
    /// assert_eq!(template.render("foo"), "Defines a function named foo");
    /// ```
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut literal = String::new();
        let mut pieces = Vec::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, c)| c == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, c)| c == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedBrace { offset }),
                '{' => {
                    let mut index = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, d)) if d.is_ascii_digit() => index.push(d),
                            Some(_) => return Err(TemplateError::InvalidPlaceholder { offset }),
                            None => return Err(TemplateError::Unterminated { offset }),
                        }
                    }
                    if !index.is_empty() {
                        let index = index
                            .parse::<usize>()
                            .map_err(|_| TemplateError::InvalidPlaceholder { offset })?;
                        if index != 0 {
                            return Err(TemplateError::PositionOutOfRange { index });
                        }
                    }
                    pieces.push(std::mem::take(&mut literal));
                }
                c => literal.push(c),
            }
        }

        match pieces.len() {
            0 => Err(TemplateError::NoPlaceholder),
            1 => Ok(Self {
                source: source.to_string(),
                before: pieces.remove(0),
                after: literal,
            }),
            count => Err(TemplateError::TooManyPlaceholders { count }),
        }
    }

    /// Substitute `value` into the placeholder.
    pub fn render(&self, value: &str) -> String {
        format!("{}{value}{}", self.before, self.after)
    }

    /// The template as originally written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}
