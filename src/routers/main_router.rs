use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        comments::{delete_comment::delete_comment, list_comments::list_comments},
        server::{fallback::fallback_handler, healthcheck::healthcheck, root::root_handler},
    },
    init::state::ServerState,
};

use super::middleware::{
    auth::auth_middleware, is_logged_in::is_logged_in_middleware, logging::log_middleware,
};

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let auth_middleware = from_fn_with_state(state.clone(), auth_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let is_logged_in_middleware = from_fn_with_state(state.clone(), is_logged_in_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);
    let cors_layer = CorsLayer::very_permissive();

    // Publicly accessible API routes
    let public_router = Router::new()
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/api/healthcheck/state", get(root_handler))
        .route("/api/comments", get(list_comments));

    // API routes requiring authentication
    let protected_router = Router::new()
        .route("/api/comments/{comment_id}", delete(delete_comment))
        .layer(auth_middleware);

    let api_router = public_router
        .merge(protected_router)
        .layer(is_logged_in_middleware)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(cors_layer)
        .with_state(state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .fallback(fallback_handler)
}
