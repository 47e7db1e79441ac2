//! Repository trait for user data access.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::error::AppError;

/// Repository interface for managing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the name is already taken and
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, name: String, email: String) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError>;

    /// Lists users ordered by id, optionally restricted to an id set.
    async fn list(
        &self,
        ids: Option<Vec<i64>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, AppError>;

    /// Deletes a user row. Returns `true` when a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
