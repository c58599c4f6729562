//! Repository for the `log_entries` table.

use sqlx::PgPool;

use loghive_core::entry::{validate_entries, NewEntry};
use loghive_core::types::{DbId, Timestamp};

use crate::error::EntryError;
use crate::models::entry::{EntriesQuery, LogEntry};

/// Fixed number of rows per browse page.
pub const PAGE_SIZE: i64 = 100;

/// Column list for `log_entries` SELECT queries.
const COLUMNS: &str = "\
    id, timestamp, log_line, application, host, environment, ip, \
    created_at, updated_at, deleted_at";

/// Column list for INSERT (excludes auto-generated columns).
const INSERT_COLUMNS: &str = "timestamp, log_line, application, host, environment, ip";

/// Number of bind parameters per inserted row.
const INSERT_BINDS: u32 = 6;

/// Provides create and query operations for log entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Validate and persist a batch of candidate entries.
    ///
    /// The validator runs over the whole batch first; on any rule
    /// violation nothing is persisted. The batch is written with a single
    /// multi-row INSERT, so all rows become visible together or not at
    /// all. `ip` is the producing client's address as resolved by the
    /// caller and is applied to every row.
    pub async fn create(
        pool: &PgPool,
        ip: &str,
        entries: &[NewEntry],
    ) -> Result<Vec<LogEntry>, EntryError> {
        validate_entries(entries)?;

        // Build a multi-row INSERT statement.
        let mut query = format!("INSERT INTO log_entries ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in entries {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..INSERT_BINDS {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        query.push_str(&format!(" RETURNING {COLUMNS}"));

        let mut q = sqlx::query_as::<_, LogEntry>(&query);
        for entry in entries {
            q = q
                .bind(entry.timestamp)
                .bind(&entry.log_line)
                .bind(&entry.application)
                .bind(&entry.host)
                .bind(&entry.environment)
                .bind(ip);
        }

        Ok(q.fetch_all(pool).await?)
    }

    /// Browse entries matching the given filters.
    ///
    /// Results exclude soft-deleted rows and are ordered by `timestamp`
    /// ascending with `id` as the tie-break, in fixed pages of
    /// [`PAGE_SIZE`]. A page past the end of the collection is empty.
    pub async fn query(pool: &PgPool, params: &EntriesQuery) -> Result<Vec<LogEntry>, sqlx::Error> {
        let page = if params.page <= 0 { 1 } else { params.page };
        let offset = (page - 1) * PAGE_SIZE;

        let (where_clause, bind_values, bind_idx) = build_entries_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM log_entries {where_clause} \
             ORDER BY timestamp ASC, id ASC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_entry_values(sqlx::query_as::<_, LogEntry>(&query), &bind_values);
        q.bind(PAGE_SIZE).bind(offset).fetch_all(pool).await
    }

    /// Distinct application names across non-deleted entries, ascending.
    pub async fn applications(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT application FROM log_entries \
             WHERE deleted_at IS NULL ORDER BY application",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct host names across non-deleted entries, ascending.
    pub async fn hosts(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT host FROM log_entries \
             WHERE deleted_at IS NULL ORDER BY host",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct environment names across non-deleted entries, ascending.
    pub async fn environments(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT environment FROM log_entries \
             WHERE deleted_at IS NULL ORDER BY environment",
        )
        .fetch_all(pool)
        .await
    }

    /// Soft-delete one entry, hiding it from every normal read.
    ///
    /// Returns whether a live row was marked; a second call on the same
    /// id returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE log_entries SET deleted_at = now(), updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built entry queries.
enum BindValue {
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from browse filter parameters.
///
/// Always constrains to non-deleted rows. Label filters apply only when
/// present and non-empty; time bounds only when present, each inclusive.
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_entries_filter(params: &EntriesQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["deleted_at IS NULL".to_string()];
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    for (column, value) in [
        ("application", &params.application),
        ("host", &params.host),
        ("environment", &params.environment),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            conditions.push(format!("{column} = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(value.to_string()));
        }
    }

    if let Some(from) = params.from_time {
        conditions.push(format!("timestamp >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = params.to_time {
        conditions.push(format!("timestamp <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_entry_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
