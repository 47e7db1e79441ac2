//! User DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::User;

/// Body of `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUserRequest {
    #[validate(length(min = 1, max = 250, message = "name must be 1 to 250 characters long"))]
    pub name: String,
    #[validate(email(message = "email must be well formed"))]
    pub email: String,
}

/// Full user representation.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Short user representation embedded in event DTOs.
#[derive(Debug, Serialize)]
pub struct UserShortDto {
    pub id: i64,
    pub name: String,
}

impl From<&User> for UserShortDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}
