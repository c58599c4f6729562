//! Candidate log entries and their validation rules.

use serde::Deserialize;

use crate::labels;
use crate::types::Timestamp;

/// A candidate log entry submitted for ingestion.
///
/// Carries only producer-supplied fields. The client address and all
/// bookkeeping columns are assigned at persistence time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub timestamp: Timestamp,
    pub log_line: String,
    pub application: String,
    pub host: String,
    pub environment: String,
}

/// Why a batch of candidate entries was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one entry is required")]
    EmptyBatch,

    #[error("field log_line must not be empty")]
    EmptyLogLine,

    #[error("field timestamp must be set")]
    MissingTimestamp,

    #[error("field {field} must match {}", labels::LABEL_PATTERN)]
    InvalidLabel { field: &'static str },
}

/// Validate a batch of candidate entries.
///
/// The whole batch is rejected on the first rule violation encountered;
/// later entries are not inspected and no side effects occur. Checks, per
/// entry: non-empty `log_line`, a timestamp that is not the epoch
/// sentinel, and the label rule on `application`, `host` and
/// `environment`.
pub fn validate_entries(entries: &[NewEntry]) -> Result<(), ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    for entry in entries {
        if entry.log_line.is_empty() {
            return Err(ValidationError::EmptyLogLine);
        }
        if entry.timestamp == Timestamp::UNIX_EPOCH {
            return Err(ValidationError::MissingTimestamp);
        }
        for (field, value) in [
            ("application", &entry.application),
            ("host", &entry.host),
            ("environment", &entry.environment),
        ] {
            if !labels::is_valid_label(value) {
                return Err(ValidationError::InvalidLabel { field });
            }
        }
    }
    Ok(())
}
