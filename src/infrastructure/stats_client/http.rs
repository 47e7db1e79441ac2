//! Reqwest implementation of the stats gateway.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::{StatsGateway, ViewStats};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Window wide enough to cover every recorded hit, in days.
const MAX_WINDOW_DAYS: i64 = 36_500;

/// Hit record posted to the stats server.
#[derive(Debug, Serialize)]
struct EndpointHit<'a> {
    app: &'a str,
    uri: &'a str,
    ip: &'a str,
    timestamp: String,
}

/// HTTP client for the stats server.
pub struct HttpStatsClient {
    client: reqwest::Client,
    base_url: String,
    app_name: String,
}

impl HttpStatsClient {
    /// Creates a client for the stats server at `base_url`.
    ///
    /// The request timeout bounds how long a slow stats server can delay the
    /// caller's request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_name: "explore-with-me".to_string(),
        })
    }
}

#[async_trait]
impl StatsGateway for HttpStatsClient {
    async fn record_hit(&self, uri: &str, ip: &str) {
        let hit = EndpointHit {
            app: &self.app_name,
            uri,
            ip,
            timestamp: Utc::now().naive_utc().format(DATE_TIME_FORMAT).to_string(),
        };

        let url = format!("{}/hit", self.base_url);
        match self.client.post(&url).json(&hit).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(uri, ip, "hit recorded");
            }
            Ok(response) => {
                tracing::warn!(uri, status = %response.status(), "stats server rejected hit");
            }
            Err(e) => {
                tracing::warn!(uri, "failed to record hit: {e}");
            }
        }
    }

    async fn view_counts(&self, uris: &[String]) -> Option<HashMap<String, i64>> {
        let now = Utc::now().naive_utc();
        let start = (now - chrono::Duration::days(MAX_WINDOW_DAYS))
            .format(DATE_TIME_FORMAT)
            .to_string();
        let end = (now + chrono::Duration::days(MAX_WINDOW_DAYS))
            .format(DATE_TIME_FORMAT)
            .to_string();

        let url = format!("{}/stats", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("start", start),
            ("end", end),
            ("unique", "true".to_string()),
        ];
        if !uris.is_empty() {
            query.push(("uris", uris.join(",")));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let stats: Vec<ViewStats> = match response {
            Ok(r) => match r.json().await {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!("undecodable stats response: {e}");
                    return None;
                }
            },
            Err(e) => {
                tracing::warn!("failed to fetch view counts: {e}");
                return None;
            }
        };

        Some(stats.into_iter().map(|s| (s.uri, s.hits)).collect())
    }
}
