//! Command-line interface for Thanos Arena
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

use crate::arena::config::ArenaVariant;

/// Boss-fight vignette with a live damage leaderboard
#[derive(Parser, Debug)]
#[command(name = "thanos_arena")]
#[command(about = "Boss-fight vignette with a live damage leaderboard")]
#[command(version)]
pub struct Args {
    /// Scene variant: solo, squad or wave (graphical mode only)
    #[arg(long, default_value = "solo", value_parser = parse_variant)]
    pub variant: ArenaVariant,

    /// Seed for a reproducible scene; overrides the headless config's seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the scene log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum scene duration in seconds (headless mode only)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

fn parse_variant(s: &str) -> Result<ArenaVariant, String> {
    s.parse()
}

pub fn parse_args() -> Args {
    Args::parse()
}
