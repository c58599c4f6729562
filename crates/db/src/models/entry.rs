//! Log entry entity and query models.

use loghive_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `log_entries` table.
///
/// Entries are immutable once created: there is no update path, only
/// soft deletion and the administrative destructive reset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogEntry {
    pub id: DbId,
    /// Event time asserted by the producer.
    pub timestamp: Timestamp,
    pub log_line: String,
    pub application: String,
    pub host: String,
    pub environment: String,
    /// Producing client's address, captured server-side at ingestion.
    pub ip: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Filter parameters for browsing entries.
///
/// A label filter that is `None` or an empty string imposes no constraint
/// on that field. `page` is 1-based; zero or negative values are treated
/// as page 1. Either time bound may be present alone for an open-ended
/// window; both bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    pub application: Option<String>,
    pub host: Option<String>,
    pub environment: Option<String>,
    pub page: i64,
    pub from_time: Option<Timestamp>,
    pub to_time: Option<Timestamp>,
}

/// One page of browse results.
///
/// There is deliberately no total count: callers detect the end of the
/// collection by requesting the next page and receiving an empty one.
#[derive(Debug, Clone, Serialize)]
pub struct EntriesPage {
    pub items: Vec<LogEntry>,
    pub page: i64,
}
