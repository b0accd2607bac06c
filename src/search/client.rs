//! Loggly API client

use super::types::{EventPayload, ResultSetHandle, SearchQuery};
use crate::auth::Authenticator;
use crate::config::LogglyConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pager::{HttpPageFetcher, QueryTarget, SearchResultsPager};
use crate::types::JsonValue;
use reqwest::header::HeaderMap;
use tracing::{debug, info};
use url::Url;

/// Tag applied to events sent without tags
pub const DEFAULT_TAG: &str = "loggly-search";

/// Client for the search, events and inputs endpoints
#[derive(Debug, Clone)]
pub struct LogglyClient {
    config: LogglyConfig,
    http: HttpClient,
    auth_headers: HeaderMap,
}

impl LogglyClient {
    /// Create a client; the authorization header is built once here
    pub fn new(config: LogglyConfig) -> Result<Self> {
        let http = HttpClient::with_config(config.http_client_config())?;
        let auth_headers = Authenticator::new(config.auth()).headers()?;

        Ok(Self {
            config,
            http,
            auth_headers,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &LogglyConfig {
        &self.config
    }

    /// Run a search and page through its results.
    ///
    /// The returned pager has already loaded the first page of events.
    pub async fn search(
        &self,
        query: impl Into<SearchQuery>,
    ) -> Result<SearchResultsPager<HttpPageFetcher>> {
        let query = query.into();
        let handle = self.submit(&query).await?;

        let events_uri = self.events_uri(&handle)?;
        let target = QueryTarget::new(events_uri.as_str(), self.auth_headers.clone())?;
        SearchResultsPager::new(HttpPageFetcher::new(target, self.http.clone())).await
    }

    /// Submit a query and return its result set handle
    pub async fn submit(&self, query: &SearchQuery) -> Result<ResultSetHandle> {
        if query.is_empty() {
            return Err(Error::empty_input("No search query"));
        }
        self.config.validate_for_search()?;

        let url = format!("{}/apiv2/search", self.config.api_base_url());
        let mut request = RequestConfig::new().headers(&self.auth_headers);
        for (key, value) in query.to_query_pairs() {
            request = request.query(key, value);
        }

        debug!(q = %query.q, "submitting search");
        let body: JsonValue = self.http.get_json(&url, request).await?;
        let handle = ResultSetHandle::from_search_response(&body)?;

        info!(rsid = %handle.id, status = ?handle.status, "search submitted");
        Ok(handle)
    }

    /// Events endpoint for a result set: `<api>/apiv2/events?rsid=<id>`
    pub fn events_uri(&self, handle: &ResultSetHandle) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/apiv2/events", self.config.api_base_url()))?;
        url.query_pairs_mut().append_pair("rsid", &handle.id);
        Ok(url)
    }

    /// Inputs endpoint: `<inputs>/inputs/<token>/tag/<tag,tag>`
    pub fn inputs_uri(&self, tags: &[&str]) -> Result<Url> {
        let tags = if tags.is_empty() {
            DEFAULT_TAG.to_string()
        } else {
            tags.join(",")
        };

        let mut url = Url::parse(&self.config.inputs_base_url())?;
        url.path_segments_mut()
            .map_err(|()| Error::config("inputs base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["inputs", self.config.customer_token.as_str(), "tag", tags.as_str()]);
        Ok(url)
    }

    /// Write one event to the inputs endpoint
    pub async fn send_event(&self, payload: impl Into<EventPayload>, tags: &[&str]) -> Result<()> {
        let body = payload.into().into_body()?;
        self.config.validate_for_inputs()?;

        let url = self.inputs_uri(tags)?;
        let response = self.http.post(url.as_str(), body).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(tags = ?tags, "event sent");
        Ok(())
    }
}
