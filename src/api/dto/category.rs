//! Category DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Category;

/// Body of `POST /admin/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct NewCategoryDto {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters long"))]
    pub name: String,
}

/// Full category representation; also the body of
/// `PATCH /admin/categories`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CategoryDto {
    pub id: i64,
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters long"))]
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}
