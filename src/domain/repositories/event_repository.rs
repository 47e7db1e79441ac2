//! Repository trait for event data access, including the search queries.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::entities::{Event, EventDetails, EventState, NewEvent};
use crate::error::AppError;

/// Requested result ordering for the public search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSort {
    /// Ascending by event date, applied in SQL.
    EventDate,
    /// Ascending by view count, applied in memory after view enrichment.
    Views,
}

/// Filter set for the public search. All supplied dimensions combine with
/// AND semantics; the date range is always present because the service fills
/// in the sentinel defaults before querying.
#[derive(Debug, Clone)]
pub struct PublicSearchFilter {
    /// Case-insensitive substring matched against annotation OR description.
    pub text: Option<String>,
    pub categories: Option<Vec<i64>>,
    pub paid: Option<bool>,
    pub range_start: NaiveDateTime,
    pub range_end: NaiveDateTime,
    /// When set, only events with spare participant capacity qualify.
    pub only_available: bool,
    pub sort: Option<EventSort>,
    pub offset: i64,
    pub limit: i64,
}

/// Filter set for the admin search.
#[derive(Debug, Clone)]
pub struct AdminSearchFilter {
    pub initiators: Option<Vec<i64>>,
    pub states: Option<Vec<EventState>>,
    pub categories: Option<Vec<i64>>,
    pub range_start: NaiveDateTime,
    pub range_end: NaiveDateTime,
    pub offset: i64,
    pub limit: i64,
}

/// Repository interface for managing events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, new_event: NewEvent) -> Result<EventDetails, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<EventDetails>, AppError>;

    /// Lists events by id, preserving only existing rows.
    async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<EventDetails>, AppError>;

    /// Writes back every mutable column of the event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row.
    async fn update(&self, event: &Event) -> Result<EventDetails, AppError>;

    /// Events created by the given user, ordered by id.
    async fn find_by_initiator(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventDetails>, AppError>;

    /// Whether any event references the category.
    async fn exists_by_category(&self, category_id: i64) -> Result<bool, AppError>;

    /// Events whose location's radius covers the given point.
    async fn find_within_radius(&self, lat: f64, lon: f64) -> Result<Vec<EventDetails>, AppError>;

    /// Public search over {text, categories, paid, date range, availability}.
    async fn search_public(
        &self,
        filter: &PublicSearchFilter,
    ) -> Result<Vec<EventDetails>, AppError>;

    /// Admin search over {initiators, states, categories, date range}.
    async fn search_admin(&self, filter: &AdminSearchFilter)
    -> Result<Vec<EventDetails>, AppError>;
}
