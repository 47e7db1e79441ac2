//! PostgreSQL implementation of the event repository.
//!
//! Every read goes through one joined select so callers always receive the
//! full [`EventDetails`] graph; the dynamic searches assemble their WHERE
//! clause with [`sqlx::QueryBuilder`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, QueryBuilder};

use super::SQL_DISTANCE_KM;
use crate::domain::entities::{Event, EventDetails, NewEvent};
use crate::domain::repositories::{
    AdminSearchFilter, EventRepository, EventSort, PublicSearchFilter,
};
use crate::error::AppError;

/// Column list shared by every event select; expects the event table (or the
/// insert CTE) aliased as `e` with categories/users/locations joined.
const EVENT_COLUMNS: &str = "e.id, e.annotation, e.category_id, e.confirmed_requests, \
     e.created_on, e.description, e.event_date, e.initiator_id, e.location_id, e.paid, \
     e.participant_limit, e.published_on, e.request_moderation, e.state, e.title, \
     c.name AS category_name, \
     u.name AS initiator_name, u.email AS initiator_email, \
     l.name AS location_name, l.lat AS location_lat, l.lon AS location_lon, \
     l.radius AS location_radius";

const EVENT_JOINS: &str = "JOIN categories c ON c.id = e.category_id \
     JOIN users u ON u.id = e.initiator_id \
     JOIN locations l ON l.id = e.location_id";

fn event_select() -> String {
    format!("SELECT {EVENT_COLUMNS} FROM events e {EVENT_JOINS}")
}

pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<EventDetails, AppError> {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO events (annotation, category_id, confirmed_requests, created_on,
                                    description, event_date, initiator_id, location_id, paid,
                                    participant_limit, request_moderation, state, title)
                VALUES ($1, $2, 0, $3, $4, $5, $6, $7, $8, $9, $10, 'PENDING', $11)
                RETURNING *
            )
            SELECT {EVENT_COLUMNS} FROM inserted e {EVENT_JOINS}
            "#
        );

        let details = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(new_event.annotation)
            .bind(new_event.category_id)
            .bind(Utc::now().naive_utc())
            .bind(new_event.description)
            .bind(new_event.event_date)
            .bind(new_event.initiator_id)
            .bind(new_event.location_id)
            .bind(new_event.paid)
            .bind(new_event.participant_limit)
            .bind(new_event.request_moderation)
            .bind(new_event.title)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EventDetails>, AppError> {
        let sql = format!("{} WHERE e.id = $1", event_select());

        let details = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<EventDetails>, AppError> {
        let sql = format!("{} WHERE e.id = ANY($1) ORDER BY e.id", event_select());

        let details = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn update(&self, event: &Event) -> Result<EventDetails, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET annotation = $2,
                category_id = $3,
                confirmed_requests = $4,
                description = $5,
                event_date = $6,
                location_id = $7,
                paid = $8,
                participant_limit = $9,
                published_on = $10,
                request_moderation = $11,
                state = $12,
                title = $13
            WHERE id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.annotation)
        .bind(event.category_id)
        .bind(event.confirmed_requests)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.location_id)
        .bind(event.paid)
        .bind(event.participant_limit)
        .bind(event.published_on)
        .bind(event.request_moderation)
        .bind(event.state.as_str())
        .bind(&event.title)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Event with id {} was not found",
                event.id
            )));
        }

        self.find_by_id(event.id).await?.ok_or_else(|| {
            AppError::not_found(format!("Event with id {} was not found", event.id))
        })
    }

    async fn find_by_initiator(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventDetails>, AppError> {
        let sql = format!(
            "{} WHERE e.initiator_id = $1 ORDER BY e.id LIMIT $2 OFFSET $3",
            event_select()
        );

        let details = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn exists_by_category(&self, category_id: i64) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE category_id = $1)")
                .bind(category_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_within_radius(&self, lat: f64, lon: f64) -> Result<Vec<EventDetails>, AppError> {
        let sql = format!(
            "{} WHERE {SQL_DISTANCE_KM} <= l.radius ORDER BY e.id",
            event_select()
        );

        let details = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(lat)
            .bind(lon)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn search_public(
        &self,
        filter: &PublicSearchFilter,
    ) -> Result<Vec<EventDetails>, AppError> {
        let mut qb = QueryBuilder::new(event_select());
        qb.push(" WHERE e.event_date BETWEEN ");
        qb.push_bind(filter.range_start);
        qb.push(" AND ");
        qb.push_bind(filter.range_end);

        if let Some(text) = &filter.text {
            let pattern = format!("%{text}%");
            qb.push(" AND (e.annotation ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR e.description ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if let Some(categories) = &filter.categories {
            qb.push(" AND e.category_id = ANY(");
            qb.push_bind(categories.clone());
            qb.push(")");
        }

        if let Some(paid) = filter.paid {
            qb.push(" AND e.paid = ");
            qb.push_bind(paid);
        }

        if filter.only_available {
            qb.push(" AND (e.participant_limit = 0 OR e.confirmed_requests < e.participant_limit)");
        }

        // VIEWS ordering happens in the service once counts are known.
        match filter.sort {
            Some(EventSort::EventDate) => {
                qb.push(" ORDER BY e.event_date ASC");
            }
            Some(EventSort::Views) | None => {
                qb.push(" ORDER BY e.id ASC");
            }
        }

        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        let details = qb
            .build_query_as::<EventDetails>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(details)
    }

    async fn search_admin(
        &self,
        filter: &AdminSearchFilter,
    ) -> Result<Vec<EventDetails>, AppError> {
        let mut qb = QueryBuilder::new(event_select());
        qb.push(" WHERE e.event_date BETWEEN ");
        qb.push_bind(filter.range_start);
        qb.push(" AND ");
        qb.push_bind(filter.range_end);

        if let Some(initiators) = &filter.initiators {
            qb.push(" AND e.initiator_id = ANY(");
            qb.push_bind(initiators.clone());
            qb.push(")");
        }

        if let Some(states) = &filter.states {
            let states: Vec<String> = states.iter().map(|s| s.as_str().to_string()).collect();
            qb.push(" AND e.state = ANY(");
            qb.push_bind(states);
            qb.push(")");
        }

        if let Some(categories) = &filter.categories {
            qb.push(" AND e.category_id = ANY(");
            qb.push_bind(categories.clone());
            qb.push(")");
        }

        qb.push(" ORDER BY e.id ASC LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        let details = qb
            .build_query_as::<EventDetails>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(details)
    }
}
