//! List the topics each table covers.

use clap::Args;
use color_eyre::eyre::Result;
use color_print::cprintln;
use itertools::Itertools;

use mentor::store::{Store, TableKind};

#[derive(Args, Clone, Debug)]
pub struct Config {}

pub fn main(_config: Config, store: &Store) -> Result<()> {
    for kind in TableKind::ALL {
        let topics = store.topics(kind);
        if topics.is_empty() {
            cprintln!("<bold>{}</bold>: <dim>none</dim>", kind);
        } else {
            cprintln!("<bold>{}</bold>: {}", kind, topics.iter().join(", "));
        }
    }
    Ok(())
}
