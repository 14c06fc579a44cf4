use std::sync::atomic::AtomicU64;

use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, Validation};
use tracing::debug;

use crate::routers::middleware::is_logged_in::AuthStatus;
use crate::store::app_store::AppStore;
use crate::util::auth::jwt::{decode_token, extract_token};

use super::builder::ServerStateBuilder;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) store: AppStore,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) jwt_decoding_key: DecodingKey,
    pub(crate) jwt_validation: Validation,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    /// Resolves the request principal; a missing or invalid token means logged out.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthStatus {
        let Some(token) = extract_token(headers) else {
            return AuthStatus::LoggedOut;
        };

        match decode_token(token, &self.jwt_decoding_key, &self.jwt_validation) {
            Ok(claims) => AuthStatus::LoggedIn(claims.id),
            Err(e) => {
                debug!(error = %e, "Rejected auth token");
                AuthStatus::LoggedOut
            }
        }
    }
}
