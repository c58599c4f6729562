//! Route tree for the API server.

pub mod entries;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /entries            GET browse, POST ingest
/// /entries/filters    GET distinct label values
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/entries", entries::router())
}
