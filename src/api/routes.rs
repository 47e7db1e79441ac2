//! Route tables for the three REST surfaces.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::api::handlers::{admin, private, public};
use crate::state::AppState;

/// Public read endpoints.
///
/// # Endpoints
///
/// - `GET /events`                 - Filtered event search
/// - `GET /events/{id}`            - Full event info (records a view hit)
/// - `GET /compilations`           - Compilation listing
/// - `GET /compilations/{compId}`  - One compilation
/// - `GET /categories`             - Category listing
/// - `GET /categories/{catId}`     - One category
/// - `GET /locations`              - Named places
/// - `GET /locations/events`       - Events around a point
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(public::search_events_handler))
        .route("/events/{id}", get(public::get_event_handler))
        .route("/compilations", get(public::search_compilations_handler))
        .route("/compilations/{compId}", get(public::get_compilation_handler))
        .route("/categories", get(public::get_categories_handler))
        .route("/categories/{catId}", get(public::get_category_handler))
        .route("/locations", get(public::get_locations_handler))
        .route(
            "/locations/events",
            get(public::search_events_in_location_handler),
        )
}

/// Endpoints for a user managing their own events and requests.
pub fn private_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{userId}/events",
            post(private::add_event_handler)
                .patch(private::update_event_handler)
                .get(private::get_user_events_handler),
        )
        .route(
            "/users/{userId}/events/{eventId}",
            get(private::get_user_event_handler).patch(private::cancel_event_handler),
        )
        .route(
            "/users/{userId}/events/{eventId}/requests",
            get(private::get_event_requests_handler),
        )
        .route(
            "/users/{userId}/events/{eventId}/requests/{reqId}/confirm",
            patch(private::confirm_request_handler),
        )
        .route(
            "/users/{userId}/events/{eventId}/requests/{reqId}/reject",
            patch(private::reject_request_handler),
        )
        .route(
            "/users/{userId}/requests",
            post(private::add_request_handler).get(private::get_user_requests_handler),
        )
        .route(
            "/users/{userId}/requests/{requestId}/cancel",
            patch(private::cancel_request_handler),
        )
}

/// Moderation and catalog management endpoints, nested under `/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(admin::add_user_handler).get(admin::get_users_handler),
        )
        .route("/users/{userId}", delete(admin::delete_user_handler))
        .route(
            "/categories",
            post(admin::add_category_handler).patch(admin::update_category_handler),
        )
        .route("/categories/{catId}", delete(admin::delete_category_handler))
        .route("/events", get(admin::search_events_handler))
        .route("/events/{eventId}", put(admin::update_event_handler))
        .route(
            "/events/{eventId}/publish",
            patch(admin::publish_event_handler),
        )
        .route(
            "/events/{eventId}/reject",
            patch(admin::reject_event_handler),
        )
        .route("/compilations", post(admin::add_compilation_handler))
        .route(
            "/compilations/{compId}",
            delete(admin::delete_compilation_handler),
        )
        .route(
            "/compilations/{compId}/events/{eventId}",
            patch(admin::add_event_to_compilation_handler)
                .delete(admin::remove_event_from_compilation_handler),
        )
        .route(
            "/compilations/{compId}/pin",
            patch(admin::pin_compilation_handler).delete(admin::unpin_compilation_handler),
        )
        .route("/locations", post(admin::add_location_handler))
        .route("/locations/{locId}", delete(admin::delete_location_handler))
}
