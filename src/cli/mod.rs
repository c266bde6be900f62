//! CLI module for Dishpick
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `recommend` - Run the pipeline once for a query
//! - `dishes` - Show the menu
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! dishpick serve
//!
//! # One-shot recommendation without the language model
//! dishpick recommend "something light with fish" --no-llm
//!
//! # Generate shell completions
//! dishpick completions bash > ~/.bash_completion.d/dishpick
//! ```

pub mod completions;
pub mod config;
pub mod dishes;
pub mod output;
pub mod recommend;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dishpick - dish recommendations from free-text requests
#[derive(Parser, Debug)]
#[command(
    name = "dishpick",
    version,
    about = "Recommends a dish from the menu for a free-text request"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Recommend a dish for one query
    Recommend(RecommendArgs),
    /// Show the menu
    Dishes(DishesArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "dishpick.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "DISHPICK_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "DISHPICK_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DISHPICK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Answer every request from the local rules
    #[arg(long)]
    pub no_llm: bool,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// What the guest would like, in their own words
    pub query: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "dishpick.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Answer from the local rules only
    #[arg(long)]
    pub no_llm: bool,
}

#[derive(Args, Debug)]
pub struct DishesArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "dishpick.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show one category (hot, salad, breakfast, dessert, ...)
    #[arg(short = 'k', long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "dishpick.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
