use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gallery_logging::LogDestination;
use serde::Deserialize;

/// Browse the Art Institute of Chicago collection from the terminal.
#[derive(Parser, Debug)]
#[command(name = "gallery", version, about)]
pub struct Cli {
    /// RON configuration file. Missing fields fall back to defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the catalog API base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}
