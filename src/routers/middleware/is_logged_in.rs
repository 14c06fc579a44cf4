use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::init::state::ServerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    LoggedIn(Uuid),
    LoggedOut,
}

/// Optional auth: always attaches an `AuthStatus`, never rejects.
pub async fn is_logged_in_middleware(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_status = state.authenticate(request.headers());

    request.extensions_mut().insert(auth_status);

    next.run(request).await
}
