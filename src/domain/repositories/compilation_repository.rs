//! Repository trait for compilation data access.

use async_trait::async_trait;

use crate::domain::entities::{CompilationDetails, NewCompilation};
use crate::error::AppError;

/// Repository interface for managing event compilations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompilationRepository: Send + Sync {
    /// Inserts a compilation and its membership rows in one transaction.
    async fn create(&self, new_compilation: NewCompilation)
    -> Result<CompilationDetails, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CompilationDetails>, AppError>;

    /// Lists compilations ordered by id, optionally filtered by the pinned
    /// flag.
    async fn list(
        &self,
        pinned: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CompilationDetails>, AppError>;

    async fn add_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError>;

    async fn remove_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError>;

    /// Sets the pinned flag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row.
    async fn set_pinned(&self, compilation_id: i64, pinned: bool) -> Result<(), AppError>;

    /// Deletes a compilation and its membership rows. Returns `true` when a
    /// row was removed.
    async fn delete(&self, compilation_id: i64) -> Result<bool, AppError>;
}
