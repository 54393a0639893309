use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_BATCH_SIZE;

#[derive(Parser, Debug)]
#[command(name = "eve-universe-seeder")]
#[command(version, about = "Seed an SQLite database with the EVE Online universe")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the universe from already-extracted JSONL files
    Seed {
        /// Directory containing the SDE JSONL files
        input_dir: PathBuf,

        /// SQLite database path, created if missing
        database: PathBuf,

        /// Rows per write transaction
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
        batch_size: usize,
    },

    /// Download the latest SDE (if needed) and seed the universe
    Sync {
        /// SQLite database path, created if missing
        database: PathBuf,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,

        /// Rows per write transaction
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
        batch_size: usize,
    },

    /// List pipeline stages in execution order
    Stages,
}

fn parse_batch_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default tracing filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
