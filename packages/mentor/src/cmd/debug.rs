//! Look for a common mistake in a piece of code.

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

    /// Point at where the issue occurs in the code.
    #[arg(long)]
    pub annotate: bool,

    #[command(flatten)]
    pub completion: CompletionArgs,
}

pub fn main(config: Config, store: &Store) -> Result<()> {
    let code = config.input.read()?;
    let language = config.input.language();
    let mentor = config.completion.mentor(store)?;

    let reply = mentor.debug(&language, &code, config.completion.depth());
    cmd::present(reply, |diagnosis| {
        cprintln!("<bold>{}</bold>: {}", diagnosis.rule.key, diagnosis.rule.solution);
        if let Some(span) = diagnosis.span.filter(|_| config.annotate) {
            let annotation = (span, diagnosis.rule.key.as_str());
            let snippet = Source::from(code.as_str()).annotate(Tone::Warn, [annotation]);
            println!();
            println!("{snippet}");
        }
        Ok(())
    })
}
