//! Router of the stats server.

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{get_stats_handler, save_hit_handler};
use super::state::StatsState;
use crate::api::middleware::tracing;

/// Constructs the stats server router.
///
/// # Endpoints
///
/// - `POST /hit`   - Record one visit
/// - `GET  /stats` - Aggregate view counts over a window
pub fn stats_router(state: StatsState) -> Router {
    Router::new()
        .route("/hit", post(save_hit_handler))
        .route("/stats", get(get_stats_handler))
        .with_state(state)
        .layer(tracing::layer())
}
