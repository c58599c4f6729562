//! Handlers for log entry ingestion and browsing.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use loghive_core::entry::NewEntry;
use loghive_core::timewindow;
use loghive_core::types::Timestamp;
use loghive_db::models::entry::{EntriesPage, EntriesQuery};
use loghive_db::repositories::EntryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query parameter types
// ---------------------------------------------------------------------------

/// One candidate entry in an ingestion request body.
#[derive(Debug, Deserialize)]
pub struct IngestEntry {
    /// Event time as an RFC3339 string.
    pub timestamp: String,
    pub log_line: String,
    pub application: String,
    pub host: String,
    pub environment: String,
}

/// Query parameters for the browse endpoint.
///
/// The time window is given either absolutely (`from`/`to`, RFC3339) or
/// relatively (`from_ago`/`to_ago`, `<count><unit>` before now).
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub application: Option<String>,
    pub host: Option<String>,
    pub environment: Option<String>,
    pub page: Option<i64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub from_ago: Option<String>,
    pub to_ago: Option<String>,
}

/// Distinct label values for the browse filter dropdowns.
#[derive(Debug, Serialize)]
pub struct FilterValues {
    pub applications: Vec<String>,
    pub hosts: Vec<String>,
    pub environments: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an RFC3339 timestamp from a request value.
fn parse_timestamp(field: &str, value: &str) -> AppResult<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|_| AppError::BadRequest(format!("{field} must be an RFC3339 timestamp")))
}

/// Resolve the producing client's address.
///
/// Trusts the first `X-Forwarded-For` hop when present (the service is
/// expected to sit behind a reverse proxy), otherwise falls back to the
/// socket peer address.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// Resolve the browse time window from query parameters.
///
/// Absolute and relative forms are mutually exclusive. Both relative
/// offsets resolve against a single `now` so the bounds share a basis;
/// `to_ago` defaults to now. An inverted window is rejected here, before
/// the store is involved.
fn resolve_window(params: &BrowseParams) -> AppResult<(Option<Timestamp>, Option<Timestamp>)> {
    let relative = params.from_ago.is_some() || params.to_ago.is_some();
    let absolute = params.from.is_some() || params.to.is_some();
    if relative && absolute {
        return Err(AppError::BadRequest(
            "from/to and from_ago/to_ago are mutually exclusive".into(),
        ));
    }

    if relative {
        let from_ago = params
            .from_ago
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("to_ago requires from_ago".into()))?;
        let from_offset = timewindow::parse_offset(from_ago)
            .map_err(|e| AppError::BadRequest(format!("from_ago: {e}")))?;
        let to_offset = match params.to_ago.as_deref() {
            Some(v) => timewindow::parse_offset(v)
                .map_err(|e| AppError::BadRequest(format!("to_ago: {e}")))?,
            None => chrono::Duration::zero(),
        };
        if from_offset < to_offset {
            return Err(AppError::BadRequest(
                "from_ago must reach further back than to_ago".into(),
            ));
        }
        let now = Utc::now();
        return Ok((Some(now - from_offset), Some(now - to_offset)));
    }

    let from = params
        .from
        .as_deref()
        .map(|v| parse_timestamp("from", v))
        .transpose()?;
    let to = params
        .to
        .as_deref()
        .map(|v| parse_timestamp("to", v))
        .transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::BadRequest("from must not be after to".into()));
        }
    }
    Ok((from, to))
}

// ---------------------------------------------------------------------------
// Ingest entries
// ---------------------------------------------------------------------------

/// POST /entries
///
/// Ingest a batch of log entries. The whole batch is validated before
/// anything is written; on rejection no entry is persisted.
pub async fn ingest(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<Vec<IngestEntry>>,
) -> AppResult<impl IntoResponse> {
    let mut entries = Vec::with_capacity(body.len());
    for entry in body {
        entries.push(NewEntry {
            timestamp: parse_timestamp("timestamp", &entry.timestamp)?,
            log_line: entry.log_line,
            application: entry.application,
            host: entry.host,
            environment: entry.environment,
        });
    }

    let ip = client_ip(&headers, addr);
    let created = EntryRepo::create(&state.pool, &ip, &entries).await?;
    tracing::debug!(count = created.len(), ip = %ip, "Ingested entries");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// Browse entries
// ---------------------------------------------------------------------------

/// GET /entries
///
/// Browse stored entries with label filters, a time window, and fixed
/// pages of 100. The end of the collection shows up as an empty page.
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<impl IntoResponse> {
    let (from_time, to_time) = resolve_window(&params)?;
    let page = params.page.unwrap_or(1).max(1);

    let query = EntriesQuery {
        application: params.application,
        host: params.host,
        environment: params.environment,
        page,
        from_time,
        to_time,
    };
    let items = EntryRepo::query(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: EntriesPage { items, page },
    }))
}

/// GET /entries/filters
///
/// Distinct label values for the filter dropdowns. These reflect the
/// whole table's label universe, not the currently filtered view.
pub async fn filter_values(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let applications = EntryRepo::applications(&state.pool).await?;
    let hosts = EntryRepo::hosts(&state.pool).await?;
    let environments = EntryRepo::environments(&state.pool).await?;

    Ok(Json(DataResponse {
        data: FilterValues {
            applications,
            hosts,
            environments,
        },
    }))
}
