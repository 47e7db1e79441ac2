//! PostgreSQL implementation of the compilation repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{Compilation, CompilationDetails, EventDetails, NewCompilation};
use crate::domain::repositories::CompilationRepository;
use crate::error::AppError;

pub struct PgCompilationRepository {
    pool: Arc<PgPool>,
}

impl PgCompilationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Member events of a compilation, ordered by event id.
    async fn events_of(&self, compilation_id: i64) -> Result<Vec<EventDetails>, AppError> {
        let events = sqlx::query_as::<_, EventDetails>(
            r#"
            SELECT e.id, e.annotation, e.category_id, e.confirmed_requests, e.created_on,
                   e.description, e.event_date, e.initiator_id, e.location_id, e.paid,
                   e.participant_limit, e.published_on, e.request_moderation, e.state, e.title,
                   c.name AS category_name,
                   u.name AS initiator_name, u.email AS initiator_email,
                   l.name AS location_name, l.lat AS location_lat, l.lon AS location_lon,
                   l.radius AS location_radius
            FROM compilation_events ce
            JOIN events e ON e.id = ce.event_id
            JOIN categories c ON c.id = e.category_id
            JOIN users u ON u.id = e.initiator_id
            JOIN locations l ON l.id = e.location_id
            WHERE ce.compilation_id = $1
            ORDER BY e.id
            "#,
        )
        .bind(compilation_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(events)
    }
}

#[async_trait]
impl CompilationRepository for PgCompilationRepository {
    async fn create(
        &self,
        new_compilation: NewCompilation,
    ) -> Result<CompilationDetails, AppError> {
        let mut tx = self.pool.begin().await?;

        let compilation = sqlx::query_as::<_, Compilation>(
            "INSERT INTO compilations (title, pinned) VALUES ($1, $2) RETURNING id, title, pinned",
        )
        .bind(new_compilation.title)
        .bind(new_compilation.pinned)
        .fetch_one(&mut *tx)
        .await?;

        for event_id in &new_compilation.event_ids {
            sqlx::query("INSERT INTO compilation_events (compilation_id, event_id) VALUES ($1, $2)")
                .bind(compilation.id)
                .bind(event_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let events = self.events_of(compilation.id).await?;
        Ok(CompilationDetails {
            compilation,
            events,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CompilationDetails>, AppError> {
        let compilation = sqlx::query_as::<_, Compilation>(
            "SELECT id, title, pinned FROM compilations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(compilation) = compilation else {
            return Ok(None);
        };

        let events = self.events_of(compilation.id).await?;
        Ok(Some(CompilationDetails {
            compilation,
            events,
        }))
    }

    async fn list(
        &self,
        pinned: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CompilationDetails>, AppError> {
        let compilations = sqlx::query_as::<_, Compilation>(
            r#"
            SELECT id, title, pinned
            FROM compilations
            WHERE ($1::boolean IS NULL OR pinned = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pinned)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut result = Vec::with_capacity(compilations.len());
        for compilation in compilations {
            let events = self.events_of(compilation.id).await?;
            result.push(CompilationDetails {
                compilation,
                events,
            });
        }

        Ok(result)
    }

    async fn add_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError> {
        sqlx::query("INSERT INTO compilation_events (compilation_id, event_id) VALUES ($1, $2)")
            .bind(compilation_id)
            .bind(event_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn remove_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1 AND event_id = $2")
            .bind(compilation_id)
            .bind(event_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_pinned(&self, compilation_id: i64, pinned: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE compilations SET pinned = $2 WHERE id = $1")
            .bind(compilation_id)
            .bind(pinned)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Compilation with id {compilation_id} was not found"
            )));
        }

        Ok(())
    }

    async fn delete(&self, compilation_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1")
            .bind(compilation_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM compilations WHERE id = $1")
            .bind(compilation_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
