use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

/// Sends `log` output to `path`. Stdout belongs to the game screen.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Error creating log file {}", path.display()))?;

    WriteLogger::init(level, Config::default(), file).context("Error installing logger")
}
