//! Show a quiz, or grade answers to it.
//!
//! Options are numbered from 1 on screen, and answers are given the same way:
//! `mentor quiz --answer 2 --answer 1` answers the first question with its
//! second option and the second question with its first.

use clap::Args;
use color_eyre::eyre::Result;
use color_print::cprintln;
use itertools::Itertools;

use mentor::{
    content::{Answer, Verdict},
    mentor::Mentor,
    store::Store,
};

use crate::cmd::{self, DEFAULT_LANGUAGE};

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Language to quiz on.
    #[arg(long, short, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Option number chosen for each question, in question order.
    /// Without answers, the questions are printed instead.
    #[arg(long = "answer", short, value_parser = clap::value_parser!(u32).range(1..))]
    pub answers: Vec<u32>,
}

pub fn main(config: Config, store: &Store) -> Result<()> {
    let topic = config.language.to_lowercase();
    let mentor = Mentor::new(store);

    if config.answers.is_empty() {
        return cmd::present(mentor.quiz(&topic), |questions| {
            for (number, question) in questions.iter().enumerate() {
                cprintln!("<bold>{}. {}</bold>", number + 1, question.question);
                for (option, text) in question.options.iter().enumerate() {
                    println!("   {}) {text}", option + 1);
                }
                println!();
            }
            Ok(())
        });
    }

    let answers = config
        .answers
        .iter()
        .map(|&number| Answer::Index(number as usize - 1))
        .collect_vec();
    cmd::present(mentor.grade(&topic, &answers), |report| {
        for (number, verdict) in report.verdicts.iter().enumerate() {
            match verdict {
                Verdict::Correct => cprintln!("{}. <green>{}</green>", number + 1, verdict),
                Verdict::TryAgain => cprintln!("{}. <yellow>{}</yellow>", number + 1, verdict),
            }
        }
        println!();
        cprintln!("<bold>Score: {}/{}</bold>", report.correct(), report.total);
        Ok(())
    })
}
