//! Sevlog CLI entry point.
//!
//! Builds a logger from flags, a settings file, or `SEVLOG_*` variables and
//! emits the given message once per severity.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sevlog::{ConfigLoader, Fields, LoggerBuilder, Severity};

/// Emit sample records through a configured logger
#[derive(Parser)]
#[command(name = "sevlog", version, about)]
struct Cli {
    /// Minimum severity: debug, info, warn, error, fatal
    #[arg(short, long)]
    level: Option<String>,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    /// Settings file (YAML) instead of sevlog.yaml and SEVLOG_* variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Message to emit at every severity
    #[arg(default_value = "hello from sevlog")]
    message: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load settings")?,
    };
    if let Some(level) = cli.level {
        settings.level = level;
    }
    if cli.json {
        settings.json = true;
    }

    let logger = LoggerBuilder::from_settings(&settings).build();

    for severity in Severity::ALL {
        let fields = Fields::new().with("severity", severity.as_str());
        logger.log(severity, &cli.message, &fields);
    }

    Ok(())
}
