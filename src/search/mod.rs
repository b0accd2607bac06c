//! Search session and event ingestion
//!
//! [`LogglyClient::search`] submits a query, receives a result set handle
//! and returns a [`SearchResultsPager`](crate::pager::SearchResultsPager)
//! over the matching events. [`LogglyClient::send_event`] writes a single
//! event to the inputs endpoint.

mod client;
mod types;

pub use client::{LogglyClient, DEFAULT_TAG};
pub use types::{EventPayload, ResultSetHandle, SearchOrder, SearchQuery};

#[cfg(test)]
mod tests;
