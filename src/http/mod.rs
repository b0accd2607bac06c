//! HTTP client module
//!
//! A thin wrapper over `reqwest` shared by the search, events and inputs
//! endpoints. Each call is a single attempt: transport failures and bad
//! statuses are reported to the caller, never retried here.

mod client;

pub use client::{
    ensure_status, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig,
};
