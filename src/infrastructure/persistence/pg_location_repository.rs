//! PostgreSQL implementation of the location repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use super::SQL_DISTANCE_KM;
use crate::domain::entities::{Location, NewLocation};
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;

pub struct PgLocationRepository {
    pool: Arc<PgPool>,
}

impl PgLocationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn create(&self, new_location: NewLocation) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, lat, lon, radius)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, lat, lon, radius
            "#,
        )
        .bind(new_location.name)
        .bind(new_location.lat)
        .bind(new_location.lon)
        .bind(new_location.radius)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(location)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, lat, lon, radius FROM locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(location)
    }

    async fn find_covering(&self, lat: f64, lon: f64) -> Result<Option<Location>, AppError> {
        let sql = format!(
            "SELECT id, name, lat, lon, radius FROM locations l \
             WHERE {SQL_DISTANCE_KM} <= l.radius ORDER BY id LIMIT 1"
        );

        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(lat)
            .bind(lon)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(location)
    }

    async fn list_named(&self, limit: i64, offset: i64) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, lat, lon, radius
            FROM locations
            WHERE name IS NOT NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(locations)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
