//! Domain services, one per entity lifecycle.

pub mod category_service;
pub mod compilation_service;
pub mod event_service;
pub mod location_service;
pub mod request_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use compilation_service::CompilationService;
pub use event_service::{
    AdminEventUpdate, AdminSearchQuery, EnrichedEvent, EventDraft, EventService, EventUpdate,
    PublicSearchQuery,
};
pub use location_service::{LocationDraft, LocationService};
pub use request_service::ParticipationRequestService;
pub use user_service::UserService;
