//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api::handlers;
use crate::middleware::{auth::AuthLayer, rate_limit::RateLimitLayer};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let settings = state.settings.clone();

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/options/:photo_type", get(handlers::list_options))
        .route("/headshots", post(handlers::create_headshots))
        .route("/headshots/variations", post(handlers::create_variations))
        .route("/jobs", post(handlers::submit_job))
        .route("/jobs/:id", get(handlers::job_status))
        .route("/edits", post(handlers::edit_image));

    if settings.storage.enabled {
        router = router.nest_service("/temp", ServeDir::new(&settings.storage.base_path));
    }

    router = router.layer(DefaultBodyLimit::max(settings.server.max_upload_bytes));

    if settings.rate_limit.enabled {
        router = router.layer(RateLimitLayer::new(
            settings.rate_limit.requests_per_second,
            settings.rate_limit.burst_size,
        ));
    }

    if settings.auth.enabled {
        router = router.layer(AuthLayer::new(settings.auth.api_keys.clone()));
    }

    router = router.layer(TraceLayer::new_for_http());

    if settings.server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}
