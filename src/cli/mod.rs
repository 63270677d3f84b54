//! CLI module
//!
//! Command-line interface for fetching collection pages.
//!
//! # Commands
//!
//! - `fetch` - Fetch one page of one or more collections
//! - `config` - Show the resolved configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
