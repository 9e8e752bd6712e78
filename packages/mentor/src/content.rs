//! Static lesson, quiz and career content.

use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::rules::RuleDefect;

/// A short lesson on a topic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Lesson {
    pub title: String,
    pub content: String,
}

/// A multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// The question text.
    #[serde(alias = "q")]
    pub question: String,

    /// The choices offered, in display order.
    pub options: Vec<String>,

    /// Index into `options` of the correct choice.
    #[serde(alias = "answer")]
    pub correct_index: usize,
}

impl Question {
    /// Check that the correct answer is one of the options.
    pub fn validate(&self) -> Result<(), RuleDefect> {
        if self.correct_index < self.options.len() {
            Ok(())
        } else {
            Err(RuleDefect::AnswerOutOfRange {
                answer: self.correct_index,
                options: self.options.len(),
            })
        }
    }

    /// Score a submitted answer.
    ///
    /// The answer is correct iff the selected option equals the correct
    /// option. An index past the last option selects nothing and is never
    /// correct.
    pub fn score(&self, answer: &Answer) -> Verdict {
        let selected = match answer {
            Answer::Index(index) => self.options.get(*index).map(String::as_str),
            Answer::Text(text) => Some(text.as_str()),
        };
        match selected {
            Some(choice) if self.options.get(self.correct_index).is_some_and(|c| c == choice) => {
                Verdict::Correct
            }
            _ => Verdict::TryAgain,
        }
    }
}

/// A submitted answer to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The zero-based index of the selected option.
    Index(usize),

    /// The text of the selected option.
    Text(String),
}

impl From<usize> for Answer {
    fn from(index: usize) -> Self {
        Answer::Index(index)
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Answer::Text(text.to_string())
    }
}

/// The outcome of scoring a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Verdict {
    #[display("Correct!")]
    Correct,

    #[display("Try again.")]
    TryAgain,
}

/// The result of scoring a set of answers against a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    /// One verdict per answered question, in question order.
    pub verdicts: Vec<Verdict>,

    /// Number of questions in the quiz.
    pub total: usize,
}

impl QuizReport {
    /// Score `answers` against `questions`, pairing them up in order.
    ///
    /// Answers beyond the last question are ignored; questions without an
    /// answer have no verdict and count as not correct.
    pub fn grade(questions: &[Question], answers: &[Answer]) -> Self {
        let verdicts = questions
            .iter()
            .zip(answers)
            .map(|(question, answer)| question.score(answer))
            .collect();
        Self {
            verdicts,
            total: questions.len(),
        }
    }

    /// Number of correct answers.
    pub fn correct(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| **v == Verdict::Correct)
            .count()
    }
}

/// Guidance for a career path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Guidance {
    /// Skills to learn, in recommended order, without duplicates.
    pub skills: Vec<String>,

    pub advice: String,
}

impl Guidance {
    /// Drop repeated skills, keeping the first occurrence of each.
    pub fn dedup_skills(mut self) -> Self {
        self.skills = self.skills.into_iter().unique().collect();
        self
    }
}
