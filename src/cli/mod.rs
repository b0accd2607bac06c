//! CLI module
//!
//! Command-line interface for searching and writing events.
//!
//! # Commands
//!
//! - `search` - Run a query and stream every matching event
//! - `send` - Write a single event to the inputs endpoint

mod commands;
mod runner;

pub use commands::{Cli, Commands, OrderArg, OutputFormat};
pub use runner::{format_record, Runner};
