//! Command-line surface of `reflookup`

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reflookup")]
#[command(about = "Search reference catalogs and fill reference fields")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one lookup query and print the rows
    Search(SearchArgs),

    /// Serialize a form definition the way a submitted form is recorded
    Serialize(SerializeArgs),

    /// Pick a record interactively in the lookup modal
    Pick(PickArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search endpoint
    pub url: String,

    /// Code to search for
    #[arg(default_value = "")]
    pub query: String,

    /// Reference key appended as `&ref=<key>`
    #[arg(long = "ref", value_name = "KEY")]
    pub reference: Option<String>,

    /// Print the result items as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail on request or decode errors instead of printing an empty list
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// Form definition (TOML)
    pub form: PathBuf,
}

#[derive(Args, Debug)]
pub struct PickArgs {
    /// Search endpoint
    pub url: String,

    /// Initial code in the field's code input
    #[arg(long, default_value = "")]
    pub code: String,

    /// Reference key of the field (sent only with `direct_reference` enabled)
    #[arg(long = "ref", value_name = "KEY", default_value = "")]
    pub reference: String,
}
