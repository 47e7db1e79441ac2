//! Repository trait for participation request data access.

use async_trait::async_trait;

use crate::domain::entities::{NewParticipationRequest, ParticipationRequest, RequestStatus};
use crate::error::AppError;

/// Repository interface for managing participation requests.
///
/// Writes that touch an event's confirmed counter run inside a single
/// transaction with the request row change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Inserts a new request.
    ///
    /// When the request is created `Confirmed` (moderation disabled on the
    /// event), the event's `confirmed_requests` counter is incremented in the
    /// same transaction.
    async fn create(
        &self,
        new_request: NewParticipationRequest,
    ) -> Result<ParticipationRequest, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ParticipationRequest>, AppError>;

    async fn find_by_event_and_requester(
        &self,
        event_id: i64,
        requester_id: i64,
    ) -> Result<Option<ParticipationRequest>, AppError>;

    /// All requests submitted by the user, ordered by id.
    async fn find_by_requester(&self, user_id: i64)
    -> Result<Vec<ParticipationRequest>, AppError>;

    /// All requests targeting the event, ordered by id.
    async fn find_by_event(&self, event_id: i64) -> Result<Vec<ParticipationRequest>, AppError>;

    /// Rewrites the request status without touching any counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no row.
    async fn update_status(
        &self,
        id: i64,
        status: RequestStatus,
    ) -> Result<ParticipationRequest, AppError>;

    /// Confirms the request and increments the event's confirmed counter in
    /// one transaction.
    async fn confirm(&self, id: i64, event_id: i64) -> Result<ParticipationRequest, AppError>;
}
