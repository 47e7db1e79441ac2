//! Repository trait for category data access.

use async_trait::async_trait;

use crate::domain::entities::Category;
use crate::error::AppError;

/// Repository interface for managing event categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, name: String) -> Result<Category, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Rewrites the category name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row.
    async fn update(&self, id: i64, name: String) -> Result<Category, AppError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>, AppError>;

    /// Deletes a category row. Returns `true` when a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
