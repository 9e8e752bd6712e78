//! Rule evaluation against submitted text.
//!
//! Neither mode validates its input: empty text simply matches nothing.

use super::schema::{DebugRule, ExplainRule, Finding};

/// Collect every finding of every rule, in rule order and then match order.
///
/// A rule fires once per non-overlapping occurrence of its pattern, so the
/// same rule can contribute several findings.
#[tracing::instrument(skip_all, fields(rules = rules.len(), text_len = text.len()))]
pub fn explain(rules: &[ExplainRule], text: &str) -> Vec<Finding> {
    let findings = rules
        .iter()
        .flat_map(|rule| rule.findings(text))
        .collect::<Vec<_>>();
    tracing::debug!(findings = findings.len(), "collected findings");
    findings
}

/// Return the first rule, in table order, whose pattern occurs anywhere in
/// `text`.
///
/// Earlier rules shadow later ones: when several rules would match, the one
/// with the smallest index wins.
#[tracing::instrument(skip_all, fields(rules = rules.len(), text_len = text.len()))]
pub fn diagnose<'r>(rules: &'r [DebugRule], text: &str) -> Option<&'r DebugRule> {
    let hit = rules.iter().find(|rule| rule.is_match(text));
    tracing::debug!(rule = hit.map(|r| r.key.as_str()), "diagnosed");
    hit
}
