//! Schema types for explanation and debugging rules.

use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    snippet::{Annotation, Match, Span},
    template::Template,
};

use super::RuleDefect;

/// An explanation rule as written in a rule table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplainRuleDef {
    /// Identifier of the rule within its topic.
    pub key: String,

    /// Regular expression searched for in submitted code.
    pub pattern: String,

    /// Message rendered for every occurrence of the pattern.
    pub explanation: String,
}

/// A debugging rule as written in a rule table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugRuleDef {
    /// Identifier of the rule within its topic.
    pub key: String,

    /// Regular expression whose presence signals the issue.
    pub pattern: String,

    /// Advice shown when the issue is detected.
    pub solution: String,
}

/// A compiled explanation rule.
///
/// Every occurrence of `pattern` in the submitted code produces one
/// explanation, rendered by substituting the occurrence into `explanation`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRule {
    pub key: String,
    pub pattern: Pattern,
    pub explanation: Template,
}

impl ExplainRule {
    /// Compile a rule definition, validating its pattern and template.
    pub fn compile(def: ExplainRuleDef) -> Result<Self, RuleDefect> {
        let pattern = Pattern::new(&def.pattern).map_err(RuleDefect::Pattern)?;
        let explanation = Template::parse(&def.explanation).map_err(RuleDefect::Template)?;
        Ok(Self {
            key: def.key,
            pattern,
            explanation,
        })
    }

    /// Render the explanation for a single match.
    pub fn render(&self, m: &Match) -> String {
        self.explanation.render(&m.capture)
    }

    /// All findings of this rule in `text`, in match order.
    pub fn findings(&self, text: &str) -> impl Iterator<Item = Finding> {
        self.pattern.matches(text).into_iter().map(move |m| Finding {
            rule: self.key.clone(),
            message: self.render(&m),
            span: m.span,
        })
    }
}

/// A compiled debugging rule.
#[derive(Debug, Clone, Serialize)]
pub struct DebugRule {
    pub key: String,
    pub pattern: Pattern,
    pub solution: String,
}

impl DebugRule {
    /// Compile a rule definition, validating its pattern.
    pub fn compile(def: DebugRuleDef) -> Result<Self, RuleDefect> {
        let pattern = Pattern::new(&def.pattern).map_err(RuleDefect::Pattern)?;
        Ok(Self {
            key: def.key,
            pattern,
            solution: def.solution,
        })
    }

    /// Test whether the issue is present anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Locate the first occurrence of the issue in `text`.
    pub fn locate(&self, text: &str) -> Option<Span> {
        self.pattern.find(text)
    }
}

/// One rendered explanation produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct Finding {
    /// Key of the rule that produced the finding.
    pub rule: String,

    /// The rendered explanation.
    pub message: String,

    /// Where in the submitted text the rule matched.
    pub span: Span,
}

impl From<&Finding> for Annotation {
    fn from(finding: &Finding) -> Self {
        Annotation::builder()
            .span(finding.span)
            .label(&finding.message)
            .build()
    }
}

/// A compiled regular expression.
///
/// Matching is performed on raw text: no case folding and no whitespace
/// normalization.
#[derive(Debug, Clone, Display)]
#[display("{_0}")]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Pattern)
    }

    /// Test whether this pattern matches anywhere in a given string.
    pub fn is_match(&self, s: &str) -> bool {
        self.0.is_match(s)
    }

    /// The span of the leftmost match, if any.
    pub fn find(&self, s: &str) -> Option<Span> {
        self.0.find(s).map(|m| m.range().into())
    }

    /// Get all matches in a given string.
    ///
    /// Matches are non-overlapping and returned left to right. Each match
    /// carries the text of the first capture group, or the whole match when
    /// the pattern has no groups. A first group that did not participate in
    /// the match captures the empty string.
    pub fn matches(&self, s: &str) -> Vec<Match> {
        let has_group = self.0.captures_len() > 1;
        self.0
            .captures_iter(s)
            .map(|caps| {
                let full_match = caps.get(0).expect("capture 0 always exists");
                let capture = if has_group {
                    caps.get(1).map(|m| m.as_str()).unwrap_or_default()
                } else {
                    full_match.as_str()
                };
                Match::builder()
                    .span(full_match.range())
                    .capture(capture)
                    .build()
            })
            .collect()
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}
