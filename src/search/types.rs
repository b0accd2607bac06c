//! Search and ingestion types

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ============================================================================
// Search Query
// ============================================================================

/// Sort order of search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    Asc,
    #[default]
    Desc,
}

impl SearchOrder {
    /// Value of the `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parameters of the search endpoint
///
/// Only `q` is required. Time bounds take Loggly's relative or absolute
/// forms (`-24h`, `now`, ISO 8601). Unset facets use the server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query string, e.g. `*` or `tag:web AND status:500`
    pub q: String,
    /// Start of the time range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End of the time range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// Sort order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SearchOrder>,
    /// Maximum number of events in the result set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl SearchQuery {
    /// Create a query
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Set the start of the time range
    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the end of the time range
    #[must_use]
    pub fn until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Limit the size of the result set
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// True when there is nothing to search for
    pub fn is_empty(&self) -> bool {
        self.q.trim().is_empty()
    }

    /// Query parameters for the search endpoint, in a stable order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("q".to_string(), self.q.clone())];
        if let Some(from) = &self.from {
            pairs.push(("from".to_string(), from.clone()));
        }
        if let Some(until) = &self.until {
            pairs.push(("until".to_string(), until.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.as_str().to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs
    }
}

impl From<&str> for SearchQuery {
    fn from(q: &str) -> Self {
        Self::new(q)
    }
}

impl From<String> for SearchQuery {
    fn from(q: String) -> Self {
        Self::new(q)
    }
}

// ============================================================================
// Result Set Handle
// ============================================================================

/// Handle returned by the search endpoint (the RSID)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSetHandle {
    /// Opaque result set id
    pub id: String,
    /// Server-side status, e.g. `SCHEDULED`
    #[serde(default)]
    pub status: Option<String>,
}

impl ResultSetHandle {
    /// Extract the handle from a search response body.
    ///
    /// The id may arrive as a string or a number.
    pub fn from_search_response(body: &JsonValue) -> Result<Self> {
        let rsid = body
            .get("rsid")
            .ok_or_else(|| Error::invalid_response("search result did not contain an rsid"))?;

        let id = match rsid.get("id") {
            Some(JsonValue::String(id)) if !id.is_empty() => id.clone(),
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => {
                return Err(Error::invalid_response(
                    "search result did not contain an rsid id",
                ))
            }
        };

        let status = rsid
            .get("status")
            .and_then(JsonValue::as_str)
            .map(ToString::to_string);

        Ok(Self { id, status })
    }
}

// ============================================================================
// Event Payload
// ============================================================================

/// Body of an event written to the inputs endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Plain text, posted as `{"message": ...}`
    Message(String),
    /// Structured event, objects and arrays are posted as-is
    Json(JsonValue),
}

impl EventPayload {
    /// JSON body to post, or `EmptyInput` when there is nothing to log.
    ///
    /// Null, `false`, zero and empty strings, arrays or objects count as
    /// nothing to log.
    pub fn into_body(self) -> Result<JsonValue> {
        let value = match self {
            Self::Message(message) => JsonValue::String(message),
            Self::Json(value) => value,
        };

        if is_blank(&value) {
            return Err(Error::empty_input("No message to log"));
        }

        match value {
            body @ (JsonValue::Object(_) | JsonValue::Array(_)) => Ok(body),
            scalar => Ok(json!({ "message": scalar })),
        }
    }
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
    }
}

impl From<&str> for EventPayload {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for EventPayload {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<JsonValue> for EventPayload {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}
