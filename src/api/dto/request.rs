//! Participation request DTOs.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::datetime::date_format;
use crate::domain::entities::{ParticipationRequest, RequestStatus};

/// Participation request representation.
#[derive(Debug, Serialize)]
pub struct ParticipationRequestDto {
    pub id: i64,
    #[serde(with = "date_format")]
    pub created: NaiveDateTime,
    pub event: i64,
    pub requester: i64,
    pub status: RequestStatus,
}

impl From<ParticipationRequest> for ParticipationRequestDto {
    fn from(request: ParticipationRequest) -> Self {
        Self {
            id: request.id,
            created: request.created,
            event: request.event_id,
            requester: request.requester_id,
            status: request.status,
        }
    }
}
