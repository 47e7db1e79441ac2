#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use explore_with_me::infrastructure::stats_client::StatsGateway;
use explore_with_me::state::AppState;
use sqlx::PgPool;

/// Stats gateway stub for tests: hits vanish, view counts are unavailable,
/// so every view count degrades to zero.
pub struct NullStats;

#[async_trait]
impl StatsGateway for NullStats {
    async fn record_hit(&self, _uri: &str, _ip: &str) {}

    async fn view_counts(&self, _uris: &[String]) -> Option<HashMap<String, i64>> {
        None
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::build(Arc::new(pool), Arc::new(NullStats))
}

pub async fn create_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_location(pool: &PgPool, name: Option<&str>, lat: f64, lon: f64, radius: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO locations (name, lat, lon, radius) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(lat)
    .bind(lon)
    .bind(radius)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub struct EventSeed {
    pub initiator_id: i64,
    pub category_id: i64,
    pub location_id: i64,
    pub title: String,
    pub event_date: NaiveDateTime,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub state: String,
}

impl EventSeed {
    pub fn new(initiator_id: i64, category_id: i64, location_id: i64, title: &str) -> Self {
        Self {
            initiator_id,
            category_id,
            location_id,
            title: title.to_string(),
            event_date: Utc::now().naive_utc() + Duration::days(30),
            paid: false,
            participant_limit: 0,
            request_moderation: true,
            state: "PENDING".to_string(),
        }
    }
}

pub async fn create_event(pool: &PgPool, seed: EventSeed) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO events (annotation, category_id, confirmed_requests, created_on, description,
                            event_date, initiator_id, location_id, paid, participant_limit,
                            request_moderation, state, title)
        VALUES ($1, $2, 0, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id
        "#,
    )
    .bind(format!("annotation for {}", seed.title))
    .bind(seed.category_id)
    .bind(Utc::now().naive_utc())
    .bind(format!("long description for {}", seed.title))
    .bind(seed.event_date)
    .bind(seed.initiator_id)
    .bind(seed.location_id)
    .bind(seed.paid)
    .bind(seed.participant_limit)
    .bind(seed.request_moderation)
    .bind(seed.state)
    .bind(seed.title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn confirmed_requests(pool: &PgPool, event_id: i64) -> i32 {
    sqlx::query_scalar("SELECT confirmed_requests FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
