//! CLI interface for ayat.
//!
//! Provides command-line argument parsing using clap.

pub mod display;

use clap::{Parser, Subcommand};

/// Command-line interface for ayat.
#[derive(Parser)]
#[command(name = "ayat")]
#[command(author, version, about = "Search parallel Quran translations", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search translations by words or by a /pattern/flags regular expression.
    Search {
        /// Words that must all appear (case-insensitive), or /pattern/flags.
        query: String,

        /// Translator key to search; repeat for several (default: all).
        #[arg(short, long = "translator", value_name = "KEY")]
        translators: Vec<String>,

        /// Print the raw result payload as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one sura across translations.
    Sura {
        /// Sura number (1-114).
        number: u16,

        /// Translator key to show; repeat for several (default: all).
        #[arg(short, long = "translator", value_name = "KEY")]
        translators: Vec<String>,
    },

    /// List configured translators and their data files.
    Translators,

    /// Answer JSON-lines search requests on stdin.
    Worker,

    /// Start the MCP server for AI editor integration.
    #[cfg(feature = "mcp")]
    Serve,
}
