//! Admin endpoints: moderation and catalog management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::category::{CategoryDto, NewCategoryDto};
use crate::api::dto::compilation::{CompilationDto, NewCompilationDto};
use crate::api::dto::datetime;
use crate::api::dto::event::{AdminUpdateEventRequest, EventFullDto};
use crate::api::dto::location::{LocationDto, NewLocationDto};
use crate::api::dto::params::{AdminSearchParams, UserListParams, parse_csv};
use crate::api::dto::user::{NewUserRequest, UserDto};
use crate::application::services::AdminSearchQuery;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /admin/users`
pub async fn add_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewUserRequest>,
) -> Result<Json<UserDto>, AppError> {
    payload.validate()?;
    let user = state.user_service.add_user(payload.name, payload.email).await?;
    Ok(Json(user.into()))
}

/// `GET /admin/users?ids=`
pub async fn get_users_handler(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Result<Json<Vec<UserDto>>, AppError> {
    let (from, size) = params.pagination.resolve()?;
    let ids = parse_csv(&params.ids, "ids")?;
    let users = state.user_service.get_users(ids, from, size).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// `DELETE /admin/users/{userId}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<(), AppError> {
    state.user_service.delete_user(user_id).await
}

/// `POST /admin/categories`
pub async fn add_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewCategoryDto>,
) -> Result<Json<CategoryDto>, AppError> {
    payload.validate()?;
    let category = state.category_service.add_category(payload.name).await?;
    Ok(Json(category.into()))
}

/// `PATCH /admin/categories`
pub async fn update_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CategoryDto>,
) -> Result<Json<CategoryDto>, AppError> {
    payload.validate()?;
    let category = state
        .category_service
        .update_category(payload.id, payload.name)
        .await?;
    Ok(Json(category.into()))
}

/// `DELETE /admin/categories/{catId}`
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<(), AppError> {
    state.category_service.delete_category(category_id).await
}

/// `GET /admin/events` - moderation search with view enrichment.
pub async fn search_events_handler(
    State(state): State<AppState>,
    Query(params): Query<AdminSearchParams>,
) -> Result<Json<Vec<EventFullDto>>, AppError> {
    let (from, size) = params.pagination.resolve()?;

    let states = match parse_csv::<String>(&params.states, "states")? {
        Some(values) => Some(
            values
                .iter()
                .map(|value| {
                    value.parse::<crate::domain::entities::EventState>().map_err(|_| {
                        AppError::bad_request(format!("Unknown event state: {value}"))
                    })
                })
                .collect::<Result<Vec<_>, AppError>>()?,
        ),
        None => None,
    };

    let query = AdminSearchQuery {
        initiators: parse_csv(&params.users, "users")?,
        states,
        categories: parse_csv(&params.categories, "categories")?,
        range_start: params
            .range_start
            .as_deref()
            .map(datetime::parse)
            .transpose()?,
        range_end: params
            .range_end
            .as_deref()
            .map(datetime::parse)
            .transpose()?,
        from,
        size,
        lat: params.lat,
        lon: params.lon,
    };

    let found = state.event_service.search_admin(query).await?;
    Ok(Json(found.iter().map(EventFullDto::from_enriched).collect()))
}

/// `PATCH /admin/events/{eventId}/publish`
pub async fn publish_event_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventFullDto>, AppError> {
    let details = state.event_service.publish_event(event_id).await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `PATCH /admin/events/{eventId}/reject`
pub async fn reject_event_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventFullDto>, AppError> {
    let details = state.event_service.reject_event(event_id).await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `PUT /admin/events/{eventId}`
pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<AdminUpdateEventRequest>,
) -> Result<Json<EventFullDto>, AppError> {
    payload.validate()?;
    let details = state
        .event_service
        .admin_update_event(event_id, payload.into_update())
        .await?;
    Ok(Json(EventFullDto::from_details(&details, 0)))
}

/// `POST /admin/compilations`
pub async fn add_compilation_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewCompilationDto>,
) -> Result<Json<CompilationDto>, AppError> {
    payload.validate()?;
    let details = state
        .compilation_service
        .add_compilation(payload.into_new_compilation())
        .await?;
    Ok(Json(CompilationDto::from_details(&details)))
}

/// `PATCH /admin/compilations/{compId}/events/{eventId}`
pub async fn add_event_to_compilation_handler(
    State(state): State<AppState>,
    Path((compilation_id, event_id)): Path<(i64, i64)>,
) -> Result<(), AppError> {
    state
        .compilation_service
        .add_event(compilation_id, event_id)
        .await
}

/// `DELETE /admin/compilations/{compId}/events/{eventId}`
pub async fn remove_event_from_compilation_handler(
    State(state): State<AppState>,
    Path((compilation_id, event_id)): Path<(i64, i64)>,
) -> Result<(), AppError> {
    state
        .compilation_service
        .remove_event(compilation_id, event_id)
        .await
}

/// `PATCH /admin/compilations/{compId}/pin`
pub async fn pin_compilation_handler(
    State(state): State<AppState>,
    Path(compilation_id): Path<i64>,
) -> Result<(), AppError> {
    state.compilation_service.pin(compilation_id).await
}

/// `DELETE /admin/compilations/{compId}/pin`
pub async fn unpin_compilation_handler(
    State(state): State<AppState>,
    Path(compilation_id): Path<i64>,
) -> Result<(), AppError> {
    state.compilation_service.unpin(compilation_id).await
}

/// `DELETE /admin/compilations/{compId}`
pub async fn delete_compilation_handler(
    State(state): State<AppState>,
    Path(compilation_id): Path<i64>,
) -> Result<(), AppError> {
    state.compilation_service.delete_compilation(compilation_id).await
}

/// `POST /admin/locations`
pub async fn add_location_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewLocationDto>,
) -> Result<Json<LocationDto>, AppError> {
    payload.validate()?;
    let location = state
        .location_service
        .add_location(payload.into_draft())
        .await?;
    Ok(Json(location.into()))
}

/// `DELETE /admin/locations/{locId}`
pub async fn delete_location_handler(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
) -> Result<(), AppError> {
    state.location_service.delete_location(location_id).await
}
