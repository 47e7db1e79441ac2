//! PostgreSQL implementations of the repository traits.

mod pg_category_repository;
mod pg_compilation_repository;
mod pg_event_repository;
mod pg_location_repository;
mod pg_request_repository;
mod pg_user_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_compilation_repository::PgCompilationRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_location_repository::PgLocationRepository;
pub use pg_request_repository::PgRequestRepository;
pub use pg_user_repository::PgUserRepository;

/// SQL fragment computing the spherical law-of-cosines distance in
/// kilometers between a location row (`l.lat`, `l.lon`) and the bound point
/// (`$1` = lat, `$2` = lon). Mirrors [`crate::domain::geo::distance_km`].
pub(crate) const SQL_DISTANCE_KM: &str = "degrees(acos(LEAST(1.0, \
     sin(radians(l.lat)) * sin(radians($1)) + \
     cos(radians(l.lat)) * cos(radians($1)) * cos(radians(l.lon - $2))))) * 60 * 1.8524";
