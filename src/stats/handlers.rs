//! REST handlers of the stats server.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use super::entities::{EndpointHit, ViewStats};
use super::state::StatsState;
use crate::api::dto::params::parse_csv;
use crate::error::AppError;

/// Query parameters of `GET /stats`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub start: Option<String>,
    pub end: Option<String>,
    /// Comma-separated URI list.
    pub uris: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub unique: Option<bool>,
}

/// `POST /hit` - appends one hit to the log.
pub async fn save_hit_handler(
    State(state): State<StatsState>,
    Json(payload): Json<EndpointHit>,
) -> Result<(), AppError> {
    state.stats_service.save_hit(payload).await?;
    Ok(())
}

/// `GET /stats?start&end&uris&unique` - per-URI view counts.
pub async fn get_stats_handler(
    State(state): State<StatsState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Vec<ViewStats>>, AppError> {
    let uris = parse_csv(&params.uris, "uris")?;
    let stats = state
        .stats_service
        .get_stats(
            params.start.as_deref(),
            params.end.as_deref(),
            uris,
            params.unique.unwrap_or(false),
        )
        .await?;
    Ok(Json(stats))
}
