use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pawns_core::engine::config::EngineConfig;
use pawns_core::logic::board::{DEFAULT_SIZE, MIN_SIZE};
use tracing_subscriber::EnvFilter;

mod shell;

use crate::shell::{Shell, MAX_LEVEL};

#[derive(Parser)]
#[command(version, about = "Pawns chess against a minimax machine")]
struct Opts {
    /// JSON file with engine settings (level, opponent_weight, victory_score)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Search depth of the machine, overrides the config file
    #[arg(long, value_parser = parse_level)]
    level: Option<u8>,
    /// Number of rows and columns of the board
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = parse_size)]
    size: usize,
}

fn parse_level(arg: &str) -> Result<u8, String> {
    match arg.parse::<u8>() {
        Ok(level) if (1..=MAX_LEVEL).contains(&level) => Ok(level),
        _ => Err(format!("level must be 1-{MAX_LEVEL}")),
    }
}

fn parse_size(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(size) if size >= MIN_SIZE => Ok(size),
        _ => Err(format!("size must be a number of at least {MIN_SIZE}")),
    }
}

fn load_config(opts: &Opts) -> Result<EngineConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("cannot load {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(level) = opts.level {
        config.level = level;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    let config = load_config(&opts)?;
    tracing::debug!(?config, size = opts.size, "starting shell");

    let mut shell = Shell::new(io::stdin().lock(), io::stdout(), Arc::new(config), opts.size);
    shell.run()
}
