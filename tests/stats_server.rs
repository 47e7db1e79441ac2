use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use explore_with_me::stats::pg::PgHitRepository;
use explore_with_me::stats::routes::stats_router;
use explore_with_me::stats::service::StatsService;
use explore_with_me::stats::state::StatsState;
use serde_json::json;
use sqlx::PgPool;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn stats_app(pool: PgPool) -> TestServer {
    let repository = Arc::new(PgHitRepository::new(Arc::new(pool)));
    let state = StatsState {
        stats_service: Arc::new(StatsService::new(repository)),
    };
    TestServer::new(stats_router(state)).unwrap()
}

fn window() -> (String, String) {
    let now = Utc::now().naive_utc();
    (
        (now - Duration::hours(1)).format(FORMAT).to_string(),
        (now + Duration::hours(1)).format(FORMAT).to_string(),
    )
}

async fn post_hit(server: &TestServer, uri: &str, ip: &str) {
    let response = server
        .post("/hit")
        .json(&json!({
            "app": "explore-with-me",
            "uri": uri,
            "ip": ip,
            "timestamp": "2000-01-01 00:00:00"
        }))
        .await;
    response.assert_status_ok();
}

#[sqlx::test(migrations = "migrations/stats")]
async fn unique_counts_distinct_ips_and_raw_counts_hits(pool: PgPool) {
    let server = stats_app(pool);

    // three hits from two distinct IPs on the same uri
    post_hit(&server, "/events/1", "10.0.0.1").await;
    post_hit(&server, "/events/1", "10.0.0.1").await;
    post_hit(&server, "/events/1", "10.0.0.2").await;

    let (start, end) = window();

    let unique = server
        .get("/stats")
        .add_query_param("start", &start)
        .add_query_param("end", &end)
        .add_query_param("uris", "/events/1")
        .add_query_param("unique", "true")
        .await;
    unique.assert_status_ok();
    let unique: Vec<serde_json::Value> = unique.json();
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0]["hits"], 2);

    let raw = server
        .get("/stats")
        .add_query_param("start", &start)
        .add_query_param("end", &end)
        .add_query_param("uris", "/events/1")
        .add_query_param("unique", "false")
        .await;
    raw.assert_status_ok();
    let raw: Vec<serde_json::Value> = raw.json();
    assert_eq!(raw[0]["hits"], 3);
}

#[sqlx::test(migrations = "migrations/stats")]
async fn client_timestamp_is_ignored(pool: PgPool) {
    let server = stats_app(pool.clone());

    // the posted timestamp says year 2000; the stored one must be "now"
    post_hit(&server, "/events/7", "10.0.0.1").await;

    let recorded_at: chrono::NaiveDateTime =
        sqlx::query_scalar("SELECT recorded_at FROM hits LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(recorded_at > Utc::now().naive_utc() - Duration::minutes(5));
}

#[sqlx::test(migrations = "migrations/stats")]
async fn unknown_uri_yields_no_row(pool: PgPool) {
    let server = stats_app(pool);

    post_hit(&server, "/events/1", "10.0.0.1").await;

    let (start, end) = window();
    let response = server
        .get("/stats")
        .add_query_param("start", &start)
        .add_query_param("end", &end)
        .add_query_param("uris", "/events/999")
        .await;
    response.assert_status_ok();

    let stats: Vec<serde_json::Value> = response.json();
    assert!(stats.is_empty());
}

#[sqlx::test(migrations = "migrations/stats")]
async fn omitted_uris_aggregates_everything(pool: PgPool) {
    let server = stats_app(pool);

    post_hit(&server, "/events/1", "10.0.0.1").await;
    post_hit(&server, "/events/2", "10.0.0.1").await;

    let (start, end) = window();
    let response = server
        .get("/stats")
        .add_query_param("start", &start)
        .add_query_param("end", &end)
        .await;
    response.assert_status_ok();

    let stats: Vec<serde_json::Value> = response.json();
    assert_eq!(stats.len(), 2);
}

#[sqlx::test(migrations = "migrations/stats")]
async fn missing_bounds_are_fatal(pool: PgPool) {
    let server = stats_app(pool);

    let response = server
        .get("/stats")
        .add_query_param("end", "2026-01-01 00:00:00")
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "BAD_REQUEST");
}
