//! PostgreSQL implementation of the hit repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, QueryBuilder};

use super::entities::{Hit, ViewStats};
use super::repository::{HitRepository, NewHit};
use crate::error::AppError;

pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn record(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let hit = sqlx::query_as::<_, Hit>(
            r#"
            INSERT INTO hits (app, uri, ip, recorded_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, app, uri, ip, recorded_at
            "#,
        )
        .bind(new_hit.app)
        .bind(new_hit.uri)
        .bind(new_hit.ip)
        .bind(new_hit.recorded_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(hit)
    }

    async fn aggregate(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: bool,
    ) -> Result<Vec<ViewStats>, AppError> {
        let mut qb = QueryBuilder::new("SELECT app, uri, ");
        qb.push(if unique {
            "COUNT(DISTINCT ip)"
        } else {
            "COUNT(*)"
        });
        qb.push(" AS hits FROM hits WHERE recorded_at > ");
        qb.push_bind(start);
        qb.push(" AND recorded_at < ");
        qb.push_bind(end);

        if let Some(uris) = uris {
            qb.push(" AND uri = ANY(");
            qb.push_bind(uris);
            qb.push(")");
        }

        qb.push(" GROUP BY app, uri");

        let stats = qb
            .build_query_as::<ViewStats>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(stats)
    }
}
