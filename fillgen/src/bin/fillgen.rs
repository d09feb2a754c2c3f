//! Writes a large filler file for use as a test fixture.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use byte_unit::Byte;
use clap::Parser;
use fillgen::{
    config::{self, Config},
    filler::{self, Measure},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("Failed to load fillgen config: {0}")]
    Config(#[from] config::Error),
    #[error("Fill file generation failed: {0}")]
    Filler(#[from] filler::Error),
}

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// path on disk to an optional YAML configuration file
    #[clap(long)]
    config_path: Option<PathBuf>,
    /// the file to write, truncated if present
    #[clap(long)]
    path: Option<PathBuf>,
    /// the size the file must reach, for example 4096, 4KiB or "50 MiB"
    #[clap(long)]
    target_size: Option<Byte>,
    /// how the file size is measured after each line, counted or stat
    #[clap(long)]
    measure: Option<Measure>,
}

impl Cli {
    fn config(self) -> Result<Config, config::Error> {
        let config = match self.config_path {
            Some(path) => Config::from_path(&path)?,
            None => Config::default(),
        };
        Ok(config.with_overrides(self.path, self.target_size, self.measure))
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .finish()
        .init();

    let version = env!("CARGO_PKG_VERSION");
    info!("Starting fillgen {version} run.");

    let config = Cli::parse().config()?;
    let report = config.filler().generate()?;

    println!(
        "Created {} with size {} bytes",
        report.path.display(),
        report.bytes
    );
    Ok(())
}
