//! User lifecycle service.

use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for registering, listing, and removing users.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the name is already taken.
    pub async fn add_user(&self, name: String, email: String) -> Result<User, AppError> {
        if self.users.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "User with name {name} already exists"
            )));
        }

        let user = self.users.create(name, email).await?;
        tracing::debug!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Lists users ordered by id, optionally restricted to an id set.
    pub async fn get_users(
        &self,
        ids: Option<Vec<i64>>,
        from: i64,
        size: i64,
    ) -> Result<Vec<User>, AppError> {
        self.users.list(ids, size, from).await
    }

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        self.ensure_exists(user_id).await?;
        self.users.delete(user_id).await?;
        tracing::debug!(user_id, "user deleted");
        Ok(())
    }

    /// Loads a user or fails with not-found; shared by the other services.
    pub async fn ensure_exists(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id {user_id} was not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{name}@example.com"),
        }
    }

    #[tokio::test]
    async fn add_user_rejects_duplicate_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(user(1, name))));
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo));
        let result = service
            .add_user("Boris".to_string(), "boris@x.com".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn add_user_stores_new_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|name, email| name == "Boris" && email == "boris@x.com")
            .times(1)
            .returning(|name, email| Ok(User { id: 7, name, email }));

        let service = UserService::new(Arc::new(repo));
        let created = service
            .add_user("Boris".to_string(), "boris@x.com".to_string())
            .await
            .unwrap();

        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let result = service.delete_user(99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
