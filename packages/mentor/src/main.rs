//! Mentor explains code and points out common mistakes.

use std::path::{Path, PathBuf};

use color_eyre::{Result, Section};
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::{Parser, Subcommand};
use mentor::store::{self, Store};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Mentor explains code, spots common mistakes, and quizzes you on the basics.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory to load rule and content tables from.
    ///
    /// Defaults to `./mentor-data`, then the user config directory, then the
    /// tables built into the binary.
    #[arg(long, global = true, env = "MENTOR_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain what a piece of code does.
    Explain(cmd::explain::Config),

    /// Look for a common mistake in a piece of code.
    Debug(cmd::debug::Config),

    /// Show the short lessons for a language.
    Lessons(cmd::lessons::Config),

    /// Show a quiz for a language, or grade your answers.
    Quiz(cmd::quiz::Config),

    /// Show the skills and advice for a career path.
    Career(cmd::career::Config),

    /// List the topics each table covers.
    Topics(cmd::topics::Config),

    /// Validate a data directory and print its tables.
    Validate(cmd::validate::Config),
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Mentor talks to the user on stdout; logs are only for debugging, so by
    // default only errors are shown. Raise the level with `MENTOR_LOG`:
    // - `MENTOR_LOG=debug` to see which tables were loaded and from where
    // - `MENTOR_LOG=trace` to also see prompts sent to the completer
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("MENTOR_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    let data = cli.data.as_deref();
    match cli.command {
        Commands::Explain(config) => cmd::explain::main(config, load(data)?),
        Commands::Debug(config) => cmd::debug::main(config, load(data)?),
        Commands::Lessons(config) => cmd::lessons::main(config, load(data)?),
        Commands::Quiz(config) => cmd::quiz::main(config, load(data)?),
        Commands::Career(config) => cmd::career::main(config, load(data)?),
        Commands::Topics(config) => cmd::topics::main(config, load(data)?),
        Commands::Validate(config) => cmd::validate::main(config, data),
    }
    .suggestion("Run `mentor validate` to check your data tables, or set `MENTOR_LOG=debug` for details.")
}

/// Load the tables once and publish them for the rest of the process.
fn load(data: Option<&Path>) -> Result<&'static Store> {
    store::init(Store::discover(data)?)
}
