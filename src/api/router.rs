use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::batch::{create_batch_router, create_folders_router};
use super::health::create_health_router;
use super::middleware::{
    logging_middleware, rate_limit_middleware, request_body_limit, security_headers_middleware,
};
use super::rewrite::create_rewrite_router;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Only the routes that call the LLM or move files count against the limit
    let limited = Router::new()
        .merge(create_rewrite_router())
        .merge(create_batch_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let body_limit = request_body_limit(state.validator.limits().max_bytes);

    Router::new()
        .merge(create_health_router())
        .merge(create_folders_router())
        .merge(limited)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
