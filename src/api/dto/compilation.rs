//! Compilation DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::EventShortDto;
use crate::domain::entities::{CompilationDetails, NewCompilation};

/// Body of `POST /admin/compilations`.
#[derive(Debug, Deserialize, Validate)]
pub struct NewCompilationDto {
    #[validate(length(min = 1, max = 120, message = "title must be 1 to 120 characters long"))]
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub events: Option<Vec<i64>>,
}

impl NewCompilationDto {
    pub fn into_new_compilation(self) -> NewCompilation {
        NewCompilation {
            title: self.title,
            pinned: self.pinned,
            event_ids: self.events.unwrap_or_default(),
        }
    }
}

/// Compilation representation with member events.
#[derive(Debug, Serialize)]
pub struct CompilationDto {
    pub id: i64,
    pub pinned: bool,
    pub title: String,
    pub events: Vec<EventShortDto>,
}

impl CompilationDto {
    /// Member events carry zero views; compilations are not view-enriched.
    pub fn from_details(details: &CompilationDetails) -> Self {
        Self {
            id: details.compilation.id,
            pinned: details.compilation.pinned,
            title: details.compilation.title.clone(),
            events: details
                .events
                .iter()
                .map(|event| EventShortDto::from_details(event, 0))
                .collect(),
        }
    }
}
