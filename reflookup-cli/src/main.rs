mod cli;

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use cli::commands::{handle_pick_command, handle_search_command, handle_serialize_command};
use cli::{Cli, Commands};
use reflookup::LookupConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The pick UI owns the terminal, so its logs go to a file
    let interactive = matches!(cli.command, Commands::Pick(_));
    init_logging(cli.verbose, interactive);

    let config = match &cli.config {
        Some(path) => LookupConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LookupConfig::load().context("Failed to load config")?,
    };
    debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Search(args) => handle_search_command(args, &config).await,
        Commands::Serialize(args) => handle_serialize_command(args),
        Commands::Pick(args) => handle_pick_command(args, config).await,
    }
}

fn init_logging(verbose: bool, to_file: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    if to_file {
        let path = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("reflookup.log");
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // No log file, no logs; stderr would corrupt the UI
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}
