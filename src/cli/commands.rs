//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch pages of WordPress REST API collections
#[derive(Parser, Debug)]
#[command(name = "wprest-fetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base API URL, overriding the config file
    #[arg(long, global = true, env = "WPREST_BASE_URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of each given collection
    Fetch {
        /// Collection path (repeat to fetch several concurrently)
        #[arg(short, long = "slug", required = true)]
        slugs: Vec<String>,

        /// Category class selecting item decoding
        #[arg(long)]
        class: Option<String>,

        /// Page size
        #[arg(long)]
        per_page: Option<u32>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Name of the success notification
        #[arg(short, long)]
        trigger: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one notification per line)
    Json,
    /// Human-readable output
    Pretty,
}
