//! Route definitions for the `/entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// GET  /          -> browse
/// POST /          -> ingest
/// GET  /filters   -> filter_values
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::browse).post(entries::ingest))
        .route("/filters", get(entries::filter_values))
}
