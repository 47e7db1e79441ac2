//! PostgreSQL implementation of the participation request repository.
//!
//! Writes that change an event's confirmed counter run inside one
//! transaction with the request row change, so auto-confirmation and
//! explicit confirmation never leave the counter out of step.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Timelike, Utc};
use sqlx::PgPool;

use crate::domain::entities::{
    NewParticipationRequest, ParticipationRequest, RequestStatus,
};
use crate::domain::repositories::RequestRepository;
use crate::error::AppError;

const REQUEST_SELECT: &str =
    "SELECT id, created, event_id, requester_id, status FROM participation_requests";

pub struct PgRequestRepository {
    pool: Arc<PgPool>,
}

impl PgRequestRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(
        &self,
        new_request: NewParticipationRequest,
    ) -> Result<ParticipationRequest, AppError> {
        let now = Utc::now().naive_utc();
        let created = now.with_nanosecond(0).unwrap_or(now);

        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, ParticipationRequest>(
            r#"
            INSERT INTO participation_requests (created, event_id, requester_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created, event_id, requester_id, status
            "#,
        )
        .bind(created)
        .bind(new_request.event_id)
        .bind(new_request.requester_id)
        .bind(new_request.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if new_request.status == RequestStatus::Confirmed {
            sqlx::query("UPDATE events SET confirmed_requests = confirmed_requests + 1 WHERE id = $1")
                .bind(new_request.event_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(request)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ParticipationRequest>, AppError> {
        let sql = format!("{REQUEST_SELECT} WHERE id = $1");

        let request = sqlx::query_as::<_, ParticipationRequest>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(request)
    }

    async fn find_by_event_and_requester(
        &self,
        event_id: i64,
        requester_id: i64,
    ) -> Result<Option<ParticipationRequest>, AppError> {
        let sql = format!("{REQUEST_SELECT} WHERE event_id = $1 AND requester_id = $2");

        let request = sqlx::query_as::<_, ParticipationRequest>(&sql)
            .bind(event_id)
            .bind(requester_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(request)
    }

    async fn find_by_requester(
        &self,
        user_id: i64,
    ) -> Result<Vec<ParticipationRequest>, AppError> {
        let sql = format!("{REQUEST_SELECT} WHERE requester_id = $1 ORDER BY id");

        let requests = sqlx::query_as::<_, ParticipationRequest>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(requests)
    }

    async fn find_by_event(&self, event_id: i64) -> Result<Vec<ParticipationRequest>, AppError> {
        let sql = format!("{REQUEST_SELECT} WHERE event_id = $1 ORDER BY id");

        let requests = sqlx::query_as::<_, ParticipationRequest>(&sql)
            .bind(event_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(requests)
    }

    async fn update_status(
        &self,
        id: i64,
        status: RequestStatus,
    ) -> Result<ParticipationRequest, AppError> {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            r#"
            UPDATE participation_requests
            SET status = $2
            WHERE id = $1
            RETURNING id, created, event_id, requester_id, status
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        request.ok_or_else(|| {
            AppError::not_found(format!("Participation request with id {id} was not found"))
        })
    }

    async fn confirm(&self, id: i64, event_id: i64) -> Result<ParticipationRequest, AppError> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, ParticipationRequest>(
            r#"
            UPDATE participation_requests
            SET status = 'CONFIRMED'
            WHERE id = $1
            RETURNING id, created, event_id, requester_id, status
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Participation request with id {id} was not found"))
        })?;

        sqlx::query("UPDATE events SET confirmed_requests = confirmed_requests + 1 WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(request)
    }
}
