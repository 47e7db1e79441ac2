//! Shared state for the stats server.

use std::sync::Arc;

use super::service::StatsService;

#[derive(Clone)]
pub struct StatsState {
    pub stats_service: Arc<StatsService>,
}
