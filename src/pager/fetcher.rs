//! Page fetchers
//!
//! A [`PageFetcher`] turns a page number into one [`PageResponse`]. The
//! HTTP implementation talks to the events endpoint; [`fetcher_fn`] wraps a
//! closure so the cursor can be driven without a network.

use super::types::PageResponse;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Loads a single page of search results
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `page`; `None` and `Some(0)` both mean the first page
    async fn fetch(&self, page: Option<u64>) -> Result<PageResponse>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, page: Option<u64>) -> Result<PageResponse> {
        (**self).fetch(page).await
    }
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Box<T> {
    async fn fetch(&self, page: Option<u64>) -> Result<PageResponse> {
        (**self).fetch(page).await
    }
}

// ============================================================================
// Query Target
// ============================================================================

/// Immutable events endpoint plus the headers sent with every fetch
#[derive(Debug, Clone)]
pub struct QueryTarget {
    uri: Url,
    headers: HeaderMap,
}

impl QueryTarget {
    /// Parse the base URI, e.g. `https://acme.loggly.com/apiv2/events?rsid=ABC123`
    pub fn new(uri: &str, headers: HeaderMap) -> Result<Self> {
        Ok(Self {
            uri: Url::parse(uri)?,
            headers,
        })
    }

    /// The base URI as given
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Headers attached to every fetch
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// URI for a page; the base URI is used unmodified for the first page
    pub fn uri_for_page(&self, page: Option<u64>) -> Url {
        match page {
            Some(page) if page > 0 => {
                let mut uri = self.uri.clone();
                uri.query_pairs_mut().append_pair("page", &page.to_string());
                uri
            }
            _ => self.uri.clone(),
        }
    }
}

// ============================================================================
// HTTP Fetcher
// ============================================================================

/// Fetches pages from the events endpoint
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    target: QueryTarget,
    client: HttpClient,
}

impl HttpPageFetcher {
    /// Create a fetcher for a target
    pub fn new(target: QueryTarget, client: HttpClient) -> Self {
        Self { target, client }
    }

    /// The target this fetcher reads
    pub fn target(&self) -> &QueryTarget {
        &self.target
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, page: Option<u64>) -> Result<PageResponse> {
        let uri = self.target.uri_for_page(page);
        debug!(page = page.unwrap_or(0), %uri, "fetching events page");

        let config = RequestConfig::new().headers(&self.target.headers);
        self.client.get_json(uri.as_str(), config).await
    }
}

// ============================================================================
// Closure Fetcher
// ============================================================================

/// A [`PageFetcher`] backed by a synchronous closure
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap a closure as a [`PageFetcher`]
pub fn fetcher_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(Option<u64>) -> Result<PageResponse> + Send + Sync,
{
    FnFetcher { f }
}

#[async_trait]
impl<F> PageFetcher for FnFetcher<F>
where
    F: Fn(Option<u64>) -> Result<PageResponse> + Send + Sync,
{
    async fn fetch(&self, page: Option<u64>) -> Result<PageResponse> {
        (self.f)(page)
    }
}

impl<F> std::fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}
