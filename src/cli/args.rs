//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, config::ConfigCommands, edit::EditArgs,
    import::ImportArgs, list::ListArgs, rm::RmArgs, show::ShowArgs,
};

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(author, version, about = "Shoplist - a local shopping list with a running total")]
#[command(long_about = "Keep a shopping list in a local SQLite database: add, edit and remove items and see the total cost update as you go.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file (default: $SHOPLIST_DB, then config, then the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Use a throwaway in-memory store
    #[arg(long, global = true, conflicts_with = "db")]
    pub in_memory: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item to the list
    Add(AddArgs),

    /// Edit an existing item
    Edit(EditArgs),

    /// Remove an item from the list
    Rm(RmArgs),

    /// List items, newest first, with the total cost
    List(ListArgs),

    /// Show a single item
    Show(ShowArgs),

    /// Print the total cost of the list
    Total,

    /// Add items in bulk from a CSV file
    Import(ImportArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable: a table for list, a field listing for show
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
