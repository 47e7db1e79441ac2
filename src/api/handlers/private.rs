//! Private endpoints: a user managing their own events and requests.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::event::{EventFullDto, EventShortDto, NewEventDto, UpdateEventRequest};
use crate::api::dto::params::{EventIdParam, PaginationParams};
use crate::api::dto::request::ParticipationRequestDto;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /users/{userId}/events`
pub async fn add_event_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<NewEventDto>,
) -> Result<Json<EventFullDto>, AppError> {
    payload.validate()?;
    let details = state
        .event_service
        .add_event(user_id, payload.into_draft())
        .await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `PATCH /users/{userId}/events` - initiator's partial edit.
pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<EventFullDto>, AppError> {
    payload.validate()?;
    let details = state
        .event_service
        .update_event(user_id, payload.into_update())
        .await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `GET /users/{userId}/events`
pub async fn get_user_events_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<EventShortDto>>, AppError> {
    let (from, size) = params.resolve()?;
    let found = state.event_service.get_user_events(user_id, from, size).await?;
    Ok(Json(
        found
            .iter()
            .map(|details| EventShortDto::from_details(details, 0))
            .collect(),
    ))
}

/// `GET /users/{userId}/events/{eventId}`
pub async fn get_user_event_handler(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<Json<EventFullDto>, AppError> {
    let details = state.event_service.get_user_event(user_id, event_id).await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `PATCH /users/{userId}/events/{eventId}` - initiator cancels the event.
pub async fn cancel_event_handler(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<Json<EventFullDto>, AppError> {
    let details = state.event_service.cancel_event(user_id, event_id).await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `POST /users/{userId}/requests?eventId=`
pub async fn add_request_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<EventIdParam>,
) -> Result<Json<ParticipationRequestDto>, AppError> {
    let event_id = params.resolve()?;
    let request = state.request_service.add_request(user_id, event_id).await?;
    Ok(Json(request.into()))
}

/// `GET /users/{userId}/requests`
pub async fn get_user_requests_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ParticipationRequestDto>>, AppError> {
    let requests = state.request_service.get_user_requests(user_id).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// `PATCH /users/{userId}/requests/{requestId}/cancel`
pub async fn cancel_request_handler(
    State(state): State<AppState>,
    Path((user_id, request_id)): Path<(i64, i64)>,
) -> Result<Json<ParticipationRequestDto>, AppError> {
    let request = state
        .request_service
        .cancel_request(user_id, request_id)
        .await?;
    Ok(Json(request.into()))
}

/// `GET /users/{userId}/events/{eventId}/requests`
pub async fn get_event_requests_handler(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<ParticipationRequestDto>>, AppError> {
    let requests = state
        .request_service
        .get_event_requests(user_id, event_id)
        .await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// `PATCH /users/{userId}/events/{eventId}/requests/{reqId}/confirm`
pub async fn confirm_request_handler(
    State(state): State<AppState>,
    Path((user_id, event_id, request_id)): Path<(i64, i64, i64)>,
) -> Result<Json<ParticipationRequestDto>, AppError> {
    let request = state
        .request_service
        .confirm_request(user_id, event_id, request_id)
        .await?;
    Ok(Json(request.into()))
}

/// `PATCH /users/{userId}/events/{eventId}/requests/{reqId}/reject`
pub async fn reject_request_handler(
    State(state): State<AppState>,
    Path((user_id, event_id, request_id)): Path<(i64, i64, i64)>,
) -> Result<Json<ParticipationRequestDto>, AppError> {
    let request = state
        .request_service
        .reject_request(user_id, event_id, request_id)
        .await?;
    Ok(Json(request.into()))
}
