use std::sync::atomic::AtomicU64;

use jsonwebtoken::DecodingKey;

use crate::store::app_store::AppStore;
use crate::util::auth::jwt::token_validation;

use super::server_state::ServerState;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    store: Option<AppStore>,
    jwt_secret: Option<String>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn store(mut self, store: AppStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn jwt_secret(mut self, jwt_secret: &str) -> Self {
        self.jwt_secret = Some(jwt_secret.to_owned());
        self
    }

    pub fn build(self) -> anyhow::Result<ServerState> {
        let jwt_secret = self
            .jwt_secret
            .ok_or_else(|| anyhow::anyhow!("jwt_secret is required"))?;

        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            store: self
                .store
                .ok_or_else(|| anyhow::anyhow!("store is required"))?,
            responses_handled: AtomicU64::new(0u64),
            jwt_decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            jwt_validation: token_validation(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store::MemoryStore;

    #[test]
    fn missing_fields_fail_the_build() {
        let result = ServerState::builder()
            .app_name_version("comments-api 0.1.0".to_string())
            .store(AppStore::Memory(MemoryStore::new()))
            .build();

        assert!(result.is_err());
    }
}
