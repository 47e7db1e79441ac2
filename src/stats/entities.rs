//! Hit log entities and wire types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One stored visit to a URI.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Hit {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub recorded_at: NaiveDateTime,
}

/// Aggregate view count for one (app, uri) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ViewStats {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

/// Body of `POST /hit`.
///
/// The `timestamp` is accepted for wire compatibility but ignored: the
/// server stamps the receipt time itself.
#[derive(Debug, Deserialize)]
pub struct EndpointHit {
    #[serde(default)]
    pub id: Option<i64>,
    pub app: String,
    pub uri: String,
    pub ip: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
