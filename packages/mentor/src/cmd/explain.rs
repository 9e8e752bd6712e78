//! Explain what a piece of code does.

use clap::Args;
use color_eyre::eyre::Result;
use color_print::cprintln;

use mentor::{
    snippet::{Source, Tone},
    store::Store,
};

use crate::cmd::{self, CodeInput, CompletionArgs};

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(flatten)]
    pub input: CodeInput,

    /// Point at each explained construct in the code instead of listing
    /// the explanations.
    #[arg(long)]
    pub annotate: bool,

    #[command(flatten)]
    pub completion: CompletionArgs,
}

pub fn main(config: Config, store: &Store) -> Result<()> {
    let code = config.input.read()?;
    let language = config.input.language();
    let mentor = config.completion.mentor(store)?;

    let reply = mentor.explain(&language, &code, config.completion.depth());
    cmd::present(reply, |findings| {
        if config.annotate {
            let snippet = Source::from(code.as_str()).annotate(Tone::Explain, &findings);
            println!("{snippet}");
        } else {
            cprintln!("<bold>Explanation</bold>");
            for finding in &findings {
                println!("- {finding}");
            }
        }
        Ok(())
    })
}
