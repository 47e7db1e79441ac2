//! Compilation lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{CompilationDetails, NewCompilation};
use crate::domain::repositories::{CompilationRepository, EventRepository};
use crate::error::AppError;

/// Service for managing curated event compilations.
pub struct CompilationService {
    compilations: Arc<dyn CompilationRepository>,
    events: Arc<dyn EventRepository>,
}

impl CompilationService {
    pub fn new(
        compilations: Arc<dyn CompilationRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            compilations,
            events,
        }
    }

    /// Creates a compilation; every referenced event must exist.
    pub async fn add_compilation(
        &self,
        new_compilation: NewCompilation,
    ) -> Result<CompilationDetails, AppError> {
        if !new_compilation.event_ids.is_empty() {
            let found = self
                .events
                .find_by_ids(new_compilation.event_ids.clone())
                .await?;
            if found.len() != new_compilation.event_ids.len() {
                return Err(AppError::not_found(
                    "Some of the referenced events were not found",
                ));
            }
        }

        let details = self.compilations.create(new_compilation).await?;
        tracing::debug!(compilation_id = details.compilation.id, "compilation created");
        Ok(details)
    }

    pub async fn get_compilation(&self, id: i64) -> Result<CompilationDetails, AppError> {
        self.ensure_exists(id).await
    }

    /// Compilations ordered by id, optionally filtered by the pinned flag.
    pub async fn search_compilations(
        &self,
        pinned: Option<bool>,
        from: i64,
        size: i64,
    ) -> Result<Vec<CompilationDetails>, AppError> {
        self.compilations.list(pinned, size, from).await
    }

    pub async fn add_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError> {
        self.ensure_exists(compilation_id).await?;
        self.ensure_event(event_id).await?;
        self.compilations.add_event(compilation_id, event_id).await?;
        tracing::debug!(compilation_id, event_id, "event added to compilation");
        Ok(())
    }

    pub async fn remove_event(&self, compilation_id: i64, event_id: i64) -> Result<(), AppError> {
        self.ensure_exists(compilation_id).await?;
        self.ensure_event(event_id).await?;
        self.compilations
            .remove_event(compilation_id, event_id)
            .await?;
        tracing::debug!(compilation_id, event_id, "event removed from compilation");
        Ok(())
    }

    /// Pins the compilation to the main page.
    pub async fn pin(&self, compilation_id: i64) -> Result<(), AppError> {
        self.compilations.set_pinned(compilation_id, true).await
    }

    /// Removes the compilation from the main page.
    pub async fn unpin(&self, compilation_id: i64) -> Result<(), AppError> {
        self.compilations.set_pinned(compilation_id, false).await
    }

    pub async fn delete_compilation(&self, compilation_id: i64) -> Result<(), AppError> {
        self.ensure_exists(compilation_id).await?;
        self.compilations.delete(compilation_id).await?;
        tracing::debug!(compilation_id, "compilation deleted");
        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> Result<CompilationDetails, AppError> {
        self.compilations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Compilation with id {id} was not found")))
    }

    async fn ensure_event(&self, event_id: i64) -> Result<(), AppError> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Event with id {event_id} was not found"
            )));
        }
        Ok(())
    }
}
