//! # Loggly Search
//!
//! Client for the Loggly search API with a lazy result pager.
//!
//! ## Features
//!
//! - **Search**: submit a query and receive a result set handle
//! - **Paging**: walk every matching event as one forward-only sequence,
//!   fetching 50-event pages on demand
//! - **Ingestion**: write single events to the inputs endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loggly_search::{LogglyClient, LogglyConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = LogglyClient::new(LogglyConfig::from_env()?)?;
//!
//!     let mut pager = client.search("tag:web").await?;
//!     println!("{} events", pager.count());
//!
//!     while let Some(event) = pager.current().await? {
//!         println!("{event}");
//!         pager.advance();
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! LogglyClient::search ──► /apiv2/search ──► rsid
//!          │
//!          ▼
//! SearchResultsPager ──► PageFetcher ──► /apiv2/events?rsid=..&page=n
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and authorization headers
pub mod auth;

/// HTTP client
pub mod http;

/// Lazy result pager
pub mod pager;

/// Search session and event ingestion
pub mod search;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::LogglyConfig;
pub use error::{Error, ErrorKind, Result};
pub use pager::{PageFetcher, PageResponse, SearchResultsPager};
pub use search::{LogglyClient, SearchQuery};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
