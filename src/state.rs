//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    CategoryService, CompilationService, EventService, LocationService,
    ParticipationRequestService, UserService,
};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgCompilationRepository, PgEventRepository, PgLocationRepository,
    PgRequestRepository, PgUserRepository,
};
use crate::infrastructure::stats_client::StatsGateway;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub location_service: Arc<LocationService>,
    pub event_service: Arc<EventService>,
    pub compilation_service: Arc<CompilationService>,
    pub request_service: Arc<ParticipationRequestService>,
}

impl AppState {
    /// Wires the PostgreSQL repositories and the stats gateway into the
    /// service graph. This is the composition root shared by the server and
    /// the integration tests.
    pub fn build(pool: Arc<PgPool>, stats: Arc<dyn StatsGateway>) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
        let location_repository = Arc::new(PgLocationRepository::new(pool.clone()));
        let event_repository = Arc::new(PgEventRepository::new(pool.clone()));
        let compilation_repository = Arc::new(PgCompilationRepository::new(pool.clone()));
        let request_repository = Arc::new(PgRequestRepository::new(pool));

        let user_service = Arc::new(UserService::new(user_repository));
        let category_service = Arc::new(CategoryService::new(
            category_repository,
            event_repository.clone(),
        ));
        let location_service = Arc::new(LocationService::new(
            location_repository,
            event_repository.clone(),
        ));
        let event_service = Arc::new(EventService::new(
            event_repository.clone(),
            user_service.clone(),
            category_service.clone(),
            location_service.clone(),
            stats,
        ));
        let compilation_service = Arc::new(CompilationService::new(
            compilation_repository,
            event_repository,
        ));
        let request_service = Arc::new(ParticipationRequestService::new(
            request_repository,
            event_service.clone(),
            user_service.clone(),
        ));

        Self {
            user_service,
            category_service,
            location_service,
            event_service,
            compilation_service,
            request_service,
        }
    }
}
