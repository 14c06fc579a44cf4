use std::net::SocketAddr;
use std::sync::Arc;

use diesel::prelude::QueryableByName;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};
use tracing::info;

use crate::routers::main_router::build_router;
use crate::store::{app_store::AppStore, memory_store::MemoryStore, pg_store::PgStore};

use super::{
    config::{AuthConfig, DbConfig, ServerConfig, StoreBackend},
    state::ServerState,
};

pub async fn server_init_proc(start: tokio::time::Instant) -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;

    let store = match server_config.get_store_backend() {
        StoreBackend::Postgres => AppStore::Postgres(init_pg_store().await?),
        StoreBackend::Memory => AppStore::Memory(match server_config.get_memory_seed_path() {
            Some(path) => MemoryStore::from_seed_file(path).await?,
            None => MemoryStore::new(),
        }),
    };

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .store(store)
            .jwt_secret(auth_config.get_jwt_secret())
            .build()?,
    );

    let bind_addr = server_config.get_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(
        bind_addr = %bind_addr,
        store_backend = state.store().backend_name(),
        elapsed = ?start.elapsed(),
        "Backend server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Backend server stopped.");
    Ok(())
}

async fn init_pg_store() -> anyhow::Result<PgStore> {
    let num_cores: u32 = num_cpus::get_physical() as u32;

    let db_url = DbConfig::from_env()?.to_url();
    let pool_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);

    let pool = Pool::builder()
        .min_idle(Some(num_cores))
        .max_size(num_cores * 10u32)
        .build(pool_config)
        .await?;

    let store = PgStore::new(pool);
    let mut conn = store.get_conn().await?;

    #[derive(QueryableByName)]
    struct PgVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let pg_version: PgVersion = diesel::sql_query("SELECT version()")
        .get_result(&mut conn)
        .await?;

    info!("PostgreSQL version: {}", pg_version.version);

    drop(conn);
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
