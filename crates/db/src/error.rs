//! Store-level error type.

use loghive_core::entry::ValidationError;

/// Error returned by entry-store operations.
///
/// Distinguishes rejected input, which the caller can fix and resubmit,
/// from backend failures, which are opaque to the caller. Nothing is
/// retried at this layer.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The candidate batch failed validation; nothing was persisted.
    #[error("validating entries: {0}")]
    Validation(#[from] ValidationError),

    /// The storage backend failed to execute the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
