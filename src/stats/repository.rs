//! Repository trait for the hit log.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::entities::{Hit, ViewStats};
use crate::error::AppError;

/// Input data for recording a hit.
#[derive(Debug, Clone)]
pub struct NewHit {
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub recorded_at: NaiveDateTime,
}

/// Repository interface for the append-only hit log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Appends one hit.
    async fn record(&self, new_hit: NewHit) -> Result<Hit, AppError>;

    /// One aggregate row per (app, uri) among hits strictly between `start`
    /// and `end`, optionally restricted to a URI set. With `unique` set the
    /// count is over distinct IPs. Row order is unspecified.
    async fn aggregate(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: bool,
    ) -> Result<Vec<ViewStats>, AppError>;
}
