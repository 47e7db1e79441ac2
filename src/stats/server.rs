//! HTTP server initialization for the stats server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;

use super::pg::PgHitRepository;
use super::routes::stats_router;
use super::service::StatsService;
use super::state::StatsState;
use crate::config::StatsConfig;

/// Runs the stats server with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: StatsConfig) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("migrations/stats").run(&pool).await?;

    let repository = Arc::new(PgHitRepository::new(Arc::new(pool)));
    let state = StatsState {
        stats_service: Arc::new(StatsService::new(repository)),
    };

    let app = stats_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
