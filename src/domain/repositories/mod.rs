//! Repository traits for data access.
//!
//! Each trait is implemented by a PostgreSQL repository in
//! [`crate::infrastructure::persistence`] and mocked with `mockall` in
//! service unit tests.

pub mod category_repository;
pub mod compilation_repository;
pub mod event_repository;
pub mod location_repository;
pub mod request_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use compilation_repository::CompilationRepository;
pub use event_repository::{AdminSearchFilter, EventRepository, EventSort, PublicSearchFilter};
pub use location_repository::LocationRepository;
pub use request_repository::RequestRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use compilation_repository::MockCompilationRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
#[cfg(test)]
pub use request_repository::MockRequestRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
