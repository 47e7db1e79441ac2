//! Public (unauthenticated) read endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
};

use crate::api::dto::category::CategoryDto;
use crate::api::dto::compilation::CompilationDto;
use crate::api::dto::datetime;
use crate::api::dto::event::{EventFullDto, EventShortDto};
use crate::api::dto::location::LocationDto;
use crate::api::dto::params::{
    CompilationSearchParams, CoordinateParams, PaginationParams, PublicSearchParams, parse_csv,
};
use crate::api::extract::ClientIp;
use crate::application::services::PublicSearchQuery;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /events` - filtered event search with view enrichment.
///
/// Every call records one synthetic hit for the search endpoint itself.
pub async fn search_events_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    uri: Uri,
    Query(params): Query<PublicSearchParams>,
) -> Result<Json<Vec<EventShortDto>>, AppError> {
    let (from, size) = params.pagination.resolve()?;

    let query = PublicSearchQuery {
        text: params.text,
        categories: parse_csv(&params.categories, "categories")?,
        paid: params.paid,
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
        only_available: params.only_available.unwrap_or(false),
        sort: params.sort,
        from,
        size,
        lat: params.lat,
        lon: params.lon,
    };

    let found = state.event_service.search_public(query, &ip, uri.path()).await?;
    Ok(Json(found.iter().map(EventShortDto::from_enriched).collect()))
}

/// `GET /events/{id}` - full event info; records a hit for the event URI.
pub async fn get_event_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    uri: Uri,
    Path(event_id): Path<i64>,
) -> Result<Json<EventFullDto>, AppError> {
    let enriched = state
        .event_service
        .get_public_event(event_id, &ip, uri.path())
        .await?;
    Ok(Json(EventFullDto::from_enriched(&enriched)))
}

/// `GET /compilations` - compilations filtered by the pinned flag.
pub async fn search_compilations_handler(
    State(state): State<AppState>,
    Query(params): Query<CompilationSearchParams>,
) -> Result<Json<Vec<CompilationDto>>, AppError> {
    let (from, size) = params.pagination.resolve()?;
    let found = state
        .compilation_service
        .search_compilations(params.pinned, from, size)
        .await?;
    Ok(Json(found.iter().map(CompilationDto::from_details).collect()))
}

/// `GET /compilations/{compId}`
pub async fn get_compilation_handler(
    State(state): State<AppState>,
    Path(compilation_id): Path<i64>,
) -> Result<Json<CompilationDto>, AppError> {
    let details = state.compilation_service.get_compilation(compilation_id).await?;
    Ok(Json(CompilationDto::from_details(&details)))
}

/// `GET /categories`
pub async fn get_categories_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<CategoryDto>>, AppError> {
    let (from, size) = params.resolve()?;
    let categories = state.category_service.get_categories(from, size).await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// `GET /categories/{catId}`
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<CategoryDto>, AppError> {
    let category = state.category_service.get_category(category_id).await?;
    Ok(Json(category.into()))
}

/// `GET /locations` - named places only.
pub async fn get_locations_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<LocationDto>>, AppError> {
    let (from, size) = params.resolve()?;
    let locations = state.location_service.get_locations(from, size).await?;
    Ok(Json(locations.into_iter().map(LocationDto::from).collect()))
}

/// `GET /locations/events?lat&lon` - events whose location covers the point.
pub async fn search_events_in_location_handler(
    State(state): State<AppState>,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<Vec<EventShortDto>>, AppError> {
    let (lat, lon) = params.resolve()?;
    let found = state.event_service.search_in_location(lat, lon).await?;
    Ok(Json(
        found
            .iter()
            .map(|details| EventShortDto::from_details(details, 0))
            .collect(),
    ))
}
