//! Top-level router for the main service.

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::state::AppState;

/// Constructs the application router: the public and private surfaces at the
/// root, the admin surface nested under `/admin`, request tracing, and
/// trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::public_routes())
        .merge(api::routes::private_routes())
        .nest("/admin", api::routes::admin_routes())
        .with_state(state)
        .layer(api::middleware::tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
