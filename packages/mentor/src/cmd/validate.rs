//! Validate a data directory.

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::{Context, Result};
use mentor::store::Store;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Data directory to validate.
    /// If not specified, validates whichever tables would be loaded.
    pub dir: Option<PathBuf>,
}

pub fn main(config: Config, data: Option<&Path>) -> Result<()> {
    let dir = config.dir.as_deref().or(data);
    let store = Store::discover(dir).context("load tables")?;
    let yaml = serde_yaml::to_string(&store).context("serialize tables")?;
    println!("{yaml}");
    Ok(())
}
