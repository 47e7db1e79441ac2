//! Gateway to the stats server.
//!
//! The main service talks to the view-counter process over HTTP: it posts a
//! hit for every public event view or search, and fetches per-URI unique-IP
//! view counts when enriching search results. Both calls are best-effort by
//! design: a down stats server must never fail the caller's request.

mod http;

use std::collections::HashMap;

use async_trait::async_trait;

pub use http::HttpStatsClient;

/// Aggregate view count for one URI as returned by the stats server.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ViewStats {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

/// Outbound interface to the stats server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// Records one hit for the URI. Failures are logged and swallowed.
    async fn record_hit(&self, uri: &str, ip: &str);

    /// Unique-IP view counts for the given URIs over the maximal historical
    /// window, keyed by URI.
    ///
    /// Returns `None` when the stats server is unreachable or answers with
    /// something undecodable; callers treat that as zero views everywhere.
    async fn view_counts(&self, uris: &[String]) -> Option<HashMap<String, i64>>;
}
