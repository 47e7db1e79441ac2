//! Hit recording and aggregation logic.

use std::sync::Arc;

use chrono::Utc;

use super::entities::{EndpointHit, Hit, ViewStats};
use super::repository::{HitRepository, NewHit};
use crate::api::dto::datetime;
use crate::error::AppError;

/// Service for the stats server's two operations.
pub struct StatsService {
    hits: Arc<dyn HitRepository>,
}

impl StatsService {
    pub fn new(hits: Arc<dyn HitRepository>) -> Self {
        Self { hits }
    }

    /// Stores a hit, stamping the receipt time and ignoring any
    /// client-supplied timestamp.
    pub async fn save_hit(&self, endpoint_hit: EndpointHit) -> Result<Hit, AppError> {
        let hit = self
            .hits
            .record(NewHit {
                app: endpoint_hit.app,
                uri: endpoint_hit.uri,
                ip: endpoint_hit.ip,
                recorded_at: Utc::now().naive_utc(),
            })
            .await?;
        tracing::debug!(hit_id = hit.id, uri = %hit.uri, "hit recorded");
        Ok(hit)
    }

    /// Aggregates hits strictly between `start` and `end`.
    ///
    /// Both bounds are mandatory `yyyy-MM-dd HH:mm:ss` values; a missing or
    /// malformed bound is a fatal input error. A URI absent from the log
    /// simply produces no row.
    pub async fn get_stats(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        uris: Option<Vec<String>>,
        unique: bool,
    ) -> Result<Vec<ViewStats>, AppError> {
        let start = datetime::parse(start.ok_or_else(|| AppError::bad_request("start is required"))?)?;
        let end = datetime::parse(end.ok_or_else(|| AppError::bad_request("end is required"))?)?;

        self.hits.aggregate(start, end, uris, unique).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::repository::MockHitRepository;

    #[tokio::test]
    async fn save_hit_stamps_server_time() {
        let before = Utc::now().naive_utc();

        let mut repo = MockHitRepository::new();
        repo.expect_record()
            .withf(move |new_hit| new_hit.recorded_at >= before)
            .times(1)
            .returning(|new_hit| {
                Ok(Hit {
                    id: 1,
                    app: new_hit.app,
                    uri: new_hit.uri,
                    ip: new_hit.ip,
                    recorded_at: new_hit.recorded_at,
                })
            });

        let service = StatsService::new(Arc::new(repo));
        let hit = service
            .save_hit(EndpointHit {
                id: None,
                app: "explore-with-me".to_string(),
                uri: "/events/1".to_string(),
                ip: "10.0.0.1".to_string(),
                timestamp: Some("1999-01-01 00:00:00".to_string()),
            })
            .await
            .unwrap();

        // the client-supplied timestamp must not survive
        assert!(hit.recorded_at >= before);
    }

    #[tokio::test]
    async fn missing_start_is_a_fatal_input_error() {
        let service = StatsService::new(Arc::new(MockHitRepository::new()));
        let result = service
            .get_stats(None, Some("2026-01-01 00:00:00"), None, false)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn malformed_end_is_a_fatal_input_error() {
        let service = StatsService::new(Arc::new(MockHitRepository::new()));
        let result = service
            .get_stats(Some("2026-01-01 00:00:00"), Some("yesterday"), None, false)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn get_stats_passes_filters_through() {
        let mut repo = MockHitRepository::new();
        repo.expect_aggregate()
            .withf(|_, _, uris, unique| {
                *unique && uris.as_deref() == Some(&["/events/1".to_string()][..])
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![ViewStats {
                    app: "explore-with-me".to_string(),
                    uri: "/events/1".to_string(),
                    hits: 2,
                }])
            });

        let service = StatsService::new(Arc::new(repo));
        let stats = service
            .get_stats(
                Some("2026-01-01 00:00:00"),
                Some("2026-12-31 00:00:00"),
                Some(vec!["/events/1".to_string()]),
                true,
            )
            .await
            .unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].hits, 2);
    }
}
