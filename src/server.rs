//! HTTP server initialization for the main service.
//!
//! Connects to PostgreSQL, applies migrations, wires the service graph, and
//! runs the Axum server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::infrastructure::stats_client::HttpStatsClient;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the main service with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("migrations/ewm").run(&pool).await?;

    let stats_client = HttpStatsClient::new(
        config.stats_server_url.clone(),
        Duration::from_secs(config.stats_timeout_seconds),
    )?;
    tracing::info!(url = %config.stats_server_url, "Stats client configured");

    let state = AppState::build(Arc::new(pool), Arc::new(stats_client));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
