//! CLI commands and argument parsing

use crate::search::SearchOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loggly search and ingestion CLI
#[derive(Parser, Debug)]
#[command(name = "loggly-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); LOGGLY_* environment variables override it
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search events and print every match
    Search {
        /// Query string, e.g. '*' or 'tag:web'
        query: String,

        /// Start of the time range (e.g. -24h)
        #[arg(long)]
        from: Option<String>,

        /// End of the time range (e.g. now)
        #[arg(long)]
        until: Option<String>,

        /// Sort order
        #[arg(long)]
        order: Option<OrderArg>,

        /// Maximum size of the result set on the server
        #[arg(long)]
        size: Option<u32>,

        /// Stop after printing this many records
        #[arg(long)]
        max_records: Option<usize>,
    },

    /// Send one event
    Send {
        /// Message text, or a JSON document with --json
        message: String,

        /// Tags to file the event under (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Treat the message as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Sort order argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SearchOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SearchOrder::Asc,
            OrderArg::Desc => SearchOrder::Desc,
        }
    }
}
