//! Repository trait for location data access.

use async_trait::async_trait;

use crate::domain::entities::{Location, NewLocation};
use crate::error::AppError;

/// Repository interface for managing locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, new_location: NewLocation) -> Result<Location, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, AppError>;

    /// Finds a location whose radius covers the given point.
    ///
    /// Distance is computed in SQL with the same spherical formula as
    /// [`crate::domain::geo::distance_km`].
    async fn find_covering(&self, lat: f64, lon: f64) -> Result<Option<Location>, AppError>;

    /// Lists named locations ordered by id; unnamed inline event coordinates
    /// are skipped.
    async fn list_named(&self, limit: i64, offset: i64) -> Result<Vec<Location>, AppError>;

    /// Deletes a location row. Returns `true` when a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
