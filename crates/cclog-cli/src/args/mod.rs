// NOTE: Command Organization
//
// Flat subcommands, one per report. Every session report takes the same
// `SessionArgs` so `--file`, `--agent-id` and `--project` behave identically
// across `logs`, `summary`, `tools`, `errors`, `timeline`, `stats` and `around`.

mod commands;
mod common;

pub use commands::*;
pub use common::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cclog")]
#[command(about = "Reconstruct and inspect Claude Code session logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Claude Code data directory [default: config `claude_dir`, then ~/.claude]
    #[arg(long, global = true)]
    pub claude_dir: Option<PathBuf>,

    /// Directory holding cclog's config.toml
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
