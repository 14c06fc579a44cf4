use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
    util::auth::jwt::extract_token,
};

use super::is_logged_in::AuthStatus;

/// Required auth: rejects with 401 before the handler runs unless the token resolves.
/// Reuses the `AuthStatus` left by `is_logged_in_middleware` when it ran first.
pub async fn auth_middleware(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let auth_status = match request.extensions().get::<AuthStatus>().copied() {
        Some(auth_status) => auth_status,
        None => state.authenticate(request.headers()),
    };

    if auth_status == AuthStatus::LoggedOut {
        let detail = if extract_token(request.headers()).is_none() {
            "Missing authorization token"
        } else {
            "Invalid or expired authorization token"
        };
        return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, detail));
    }

    request.extensions_mut().insert(auth_status);

    let response = next.run(request).await;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Router,
        http::{StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        store::{app_store::AppStore, memory_store::MemoryStore},
        util::auth::jwt::issue_token,
    };

    const SECRET: &str = "auth-layer-secret";

    fn state() -> Arc<ServerState> {
        Arc::new(
            ServerState::builder()
                .app_name_version("comments-api-test".to_string())
                .server_start_time(tokio::time::Instant::now())
                .store(AppStore::Memory(MemoryStore::new()))
                .jwt_secret(SECRET)
                .build()
                .unwrap(),
        )
    }

    async fn whoami(Extension(auth_status): Extension<AuthStatus>) -> String {
        match auth_status {
            AuthStatus::LoggedIn(user_id) => user_id.to_string(),
            AuthStatus::LoggedOut => "anonymous".to_string(),
        }
    }

    /// The auth layer sits inside a layer that has already decided the status.
    fn router(upstream: AuthStatus) -> Router {
        let state = state();
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .layer(Extension(upstream))
            .with_state(state)
    }

    async fn status_of(router: Router, token: Option<&str>) -> StatusCode {
        let mut request = axum::http::Request::builder().uri("/whoami");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn it_should_trust_an_upstream_logged_in_status() {
        // No header at all: only the upstream status can let this through.
        let status = status_of(router(AuthStatus::LoggedIn(Uuid::new_v4())), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_not_decode_again_after_an_upstream_logged_out_status() {
        let token = issue_token(Uuid::new_v4(), SECRET, chrono::Duration::hours(1));
        let status = status_of(router(AuthStatus::LoggedOut), Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn it_should_decode_the_token_when_mounted_alone() {
        let state = state();
        let router = Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state);

        let token = issue_token(Uuid::new_v4(), SECRET, chrono::Duration::hours(1));
        assert_eq!(status_of(router.clone(), Some(&token)).await, StatusCode::OK);
        assert_eq!(status_of(router, None).await, StatusCode::UNAUTHORIZED);
    }
}
