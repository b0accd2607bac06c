//! Common types used throughout the crate
//!
//! Records travel through the pager as raw JSON and are never validated
//! there. [`EventRecord`] is a lenient typed view for consumers that render
//! the usual Loggly columns.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One log event as returned by the events endpoint
pub type Record = JsonValue;

// ============================================================================
// Event Records
// ============================================================================

/// Typed view over a [`Record`]
///
/// Shape on the wire:
/// `{ id, logmsg, tags: [..], event: { syslog: { timestamp, host } } }`.
/// Every field is optional so partially populated events still render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Raw log message
    #[serde(default)]
    pub logmsg: Option<String>,

    /// Tags attached at ingestion
    #[serde(default)]
    pub tags: Vec<String>,

    /// Structured event body
    #[serde(default)]
    pub event: EventBody,
}

/// Structured part of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBody {
    /// Syslog metadata, when present
    #[serde(default)]
    pub syslog: Option<SyslogInfo>,
}

/// Syslog metadata of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogInfo {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
}

impl EventRecord {
    /// Build a typed view from a raw record.
    ///
    /// Each field is read on its own. Scalars are rendered as text (Loggly
    /// sends epoch-millisecond timestamps as numbers), and a field of any
    /// other type is left empty without affecting the rest.
    pub fn from_record(record: &Record) -> Self {
        let syslog = record
            .pointer("/event/syslog")
            .filter(|syslog| syslog.is_object())
            .map(|syslog| SyslogInfo {
                timestamp: syslog.get("timestamp").and_then(scalar_text),
                host: syslog.get("host").and_then(scalar_text),
            });

        Self {
            id: record.get("id").and_then(scalar_text),
            logmsg: record.get("logmsg").and_then(scalar_text),
            tags: record
                .get("tags")
                .and_then(JsonValue::as_array)
                .map(|tags| tags.iter().filter_map(scalar_text).collect())
                .unwrap_or_default(),
            event: EventBody { syslog },
        }
    }

    /// Syslog timestamp, if any
    pub fn timestamp(&self) -> Option<&str> {
        self.event.syslog.as_ref()?.timestamp.as_deref()
    }

    /// Syslog host, if any
    pub fn host(&self) -> Option<&str> {
        self.event.syslog.as_ref()?.host.as_deref()
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
