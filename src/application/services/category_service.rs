//! Category lifecycle service.

use std::sync::Arc;

use crate::domain::entities::Category;
use crate::domain::repositories::{CategoryRepository, EventRepository};
use crate::error::AppError;

/// Service for managing event categories.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    events: Arc<dyn EventRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { categories, events }
    }

    /// Creates a category with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the name is already taken.
    pub async fn add_category(&self, name: String) -> Result<Category, AppError> {
        self.ensure_name_free(&name, None).await?;
        let category = self.categories.create(name).await?;
        tracing::debug!(category_id = category.id, "category created");
        Ok(category)
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row and
    /// [`AppError::Conflict`] when another category already uses the name.
    pub async fn update_category(&self, id: i64, name: String) -> Result<Category, AppError> {
        self.ensure_exists(id).await?;
        self.ensure_name_free(&name, Some(id)).await?;
        let category = self.categories.update(id, name).await?;
        tracing::debug!(category_id = category.id, "category renamed");
        Ok(category)
    }

    /// Deletes a category.
    ///
    /// Refused while any event still references the category.
    pub async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        self.ensure_exists(id).await?;
        if self.events.exists_by_category(id).await? {
            return Err(AppError::illegal_state(
                "Cannot delete a category that still has events attached",
            ));
        }

        self.categories.delete(id).await?;
        tracing::debug!(category_id = id, "category deleted");
        Ok(())
    }

    pub async fn get_categories(&self, from: i64, size: i64) -> Result<Vec<Category>, AppError> {
        self.categories.list(size, from).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, AppError> {
        self.ensure_exists(id).await
    }

    /// Loads a category or fails with not-found; shared by the event service.
    pub async fn ensure_exists(&self, id: i64) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category with id {id} was not found")))
    }

    async fn ensure_name_free(&self, name: &str, for_id: Option<i64>) -> Result<(), AppError> {
        if let Some(existing) = self.categories.find_by_name(name).await? {
            if Some(existing.id) != for_id {
                return Err(AppError::conflict(format!(
                    "Category with name {name} already exists"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockCategoryRepository, MockEventRepository};

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn add_category_rejects_duplicate_name() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name()
            .returning(|name| Ok(Some(category(3, name))));
        categories.expect_create().times(0);

        let service = CategoryService::new(Arc::new(categories), Arc::new(MockEventRepository::new()));
        let result = service.add_category("Music".to_string()).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn rename_to_own_name_is_allowed() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, "Music"))));
        categories
            .expect_find_by_name()
            .returning(|name| Ok(Some(category(3, name))));
        categories
            .expect_update()
            .times(1)
            .returning(|id, name| Ok(Category { id, name }));

        let service = CategoryService::new(Arc::new(categories), Arc::new(MockEventRepository::new()));
        let result = service.update_category(3, "Music".to_string()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_category_with_events_is_refused() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, "Music"))));
        categories.expect_delete().times(0);

        let mut events = MockEventRepository::new();
        events.expect_exists_by_category().returning(|_| Ok(true));

        let service = CategoryService::new(Arc::new(categories), Arc::new(events));
        let result = service.delete_category(3).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn delete_unreferenced_category_succeeds() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, "Music"))));
        categories.expect_delete().times(1).returning(|_| Ok(true));

        let mut events = MockEventRepository::new();
        events.expect_exists_by_category().returning(|_| Ok(false));

        let service = CategoryService::new(Arc::new(categories), Arc::new(events));
        assert!(service.delete_category(3).await.is_ok());
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let service = CategoryService::new(Arc::new(categories), Arc::new(MockEventRepository::new()));
        let result = service.get_category(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
