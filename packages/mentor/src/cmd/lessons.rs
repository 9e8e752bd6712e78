//! Show the short lessons for a language.

use clap::Args;
use color_eyre::eyre::Result;
use color_print::cprintln;

use mentor::{mentor::Mentor, store::Store};

use crate::cmd::{self, DEFAULT_LANGUAGE};

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Language to show lessons for.
    #[arg(long, short, default_value = DEFAULT_LANGUAGE)]
    pub language: String,
}

pub fn main(config: Config, store: &Store) -> Result<()> {
    let mentor = Mentor::new(store);
    cmd::present(mentor.lessons(&config.language.to_lowercase()), |lessons| {
        for lesson in lessons {
            cprintln!("<bold>{}</bold>", lesson.title);
            println!("{}", lesson.content);
            println!();
        }
        Ok(())
    })
}
