//! Subcommands of the `mentor` binary, plus the arguments they share.

use std::fs::read_to_string;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use color_print::cprintln;

use mentor::{
    completer::{CommandCompleter, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT},
    language,
    mentor::{Depth, Mentor, Notice, Reply, Severity},
    store::Store,
};

pub mod career;
pub mod debug;
pub mod explain;
pub mod lessons;
pub mod quiz;
pub mod topics;
pub mod validate;

/// Topic used when no language is given or inferred.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Where to read submitted code from.
#[derive(Args, Clone, Debug)]
pub struct CodeInput {
    /// The code to look at.
    /// If neither this nor `--file` is given, the code is read from stdin.
    #[arg(conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the code from a file.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Language of the code.
    /// Inferred from the name of `--file` when omitted, otherwise python.
    #[arg(long, short)]
    pub language: Option<String>,
}

impl CodeInput {
    /// Read the submitted code.
    pub fn read(&self) -> Result<String> {
        match (&self.code, &self.file) {
            (Some(code), _) => Ok(code.clone()),
            (None, Some(path)) => {
                read_to_string(path).with_context(|| format!("read code from {path:?}"))
            }
            (None, None) => {
                let mut code = String::new();
                std::io::stdin()
                    .read_to_string(&mut code)
                    .context("read code from stdin")?;
                Ok(code)
            }
        }
    }

    /// The topic to look the code up under.
    pub fn language(&self) -> String {
        self.language
            .as_deref()
            .or_else(|| self.file.as_deref().and_then(language::infer))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_lowercase()
    }
}

/// How to reach the completion service.
#[derive(Args, Clone, Debug)]
pub struct CompletionArgs {
    /// Skip the rule tables and ask the completion service directly.
    #[arg(long)]
    pub deep: bool,

    /// Model requested from the completion service.
    #[arg(long, env = "MENTOR_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on the length of a completion.
    #[arg(long, env = "MENTOR_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Seconds to wait for a completion before giving up.
    #[arg(long = "timeout", env = "MENTOR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl CompletionArgs {
    pub fn depth(&self) -> Depth {
        if self.deep { Depth::Deep } else { Depth::Static }
    }

    /// A mentor over `store`, with the completer from the environment if
    /// one is configured.
    pub fn mentor<'s>(&self, store: &'s Store) -> Result<Mentor<'s>> {
        let mentor = Mentor::new(store).with_model(&self.model, self.max_tokens);
        let completer = CommandCompleter::from_env(Duration::from_secs(self.timeout_secs))
            .context("configure completer")?;
        Ok(match completer {
            Some(completer) => mentor.with_completer(completer),
            None => mentor,
        })
    }
}

/// Print a reply, using `show` for a result from the tables.
pub fn present<T>(reply: Reply<T>, show: impl FnOnce(T) -> Result<()>) -> Result<()> {
    match reply {
        Reply::Found(found) => show(found),
        Reply::Completed(text) => {
            println!("{text}");
            Ok(())
        }
        Reply::Notice(notice) => {
            print_notice(&notice);
            Ok(())
        }
    }
}

fn print_notice(notice: &Notice) {
    match notice.severity() {
        Severity::Success => cprintln!("<green>{}</green>", notice),
        Severity::Warning => cprintln!("<yellow>{}</yellow>", notice),
        Severity::Error => cprintln!("<red>{}</red>", notice),
    }
}
