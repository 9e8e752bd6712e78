//! Show the skills and advice for a career path.

use clap::Args;
use color_eyre::eyre::Result;
use color_print::cprintln;
use itertools::Itertools;

use mentor::{
    mentor::Mentor,
    store::{Store, TableKind},
};

use crate::cmd;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// The career path, e.g. `frontend` or `backend`.
    /// Lists the available paths when omitted.
    pub path: Option<String>,
}

pub fn main(config: Config, store: &Store) -> Result<()> {
    let Some(path) = config.path else {
        let paths = store.topics(TableKind::Career);
        cprintln!("<bold>Available paths:</bold> {}", paths.iter().join(", "));
        return Ok(());
    };

    let mentor = Mentor::new(store);
    cmd::present(mentor.career(&path.to_lowercase()), |guidance| {
        cprintln!("<bold>Skills to learn:</bold> {}", guidance.skills.iter().join(", "));
        cprintln!("<bold>Advice:</bold> {}", guidance.advice);
        Ok(())
    })
}
