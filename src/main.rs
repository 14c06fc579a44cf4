use init::{logger::init_tracing, server_init::server_init_proc};
use mimalloc::MiMalloc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// modules tree
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}
pub mod docs;
pub mod domain {
    pub mod auth {
        pub mod role;
    }
    pub mod comment;
    pub mod pagination;
    pub mod user;
}
pub mod dto {
    pub mod requests {
        pub mod comments {
            pub mod list_comments_request;
        }
    }
    pub mod responses {
        pub mod comments {
            pub mod list_comments_response;
        }
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod comments {
        pub mod delete_comment;
        pub mod list_comments;
    }
    pub mod server {
        pub mod fallback;
        pub mod healthcheck;
        pub mod root;
    }
}
pub mod init {
    pub mod config;
    pub mod logger;
    pub mod server_init;
    pub mod state;
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod is_logged_in;
        pub mod logging;
    }
    #[cfg(test)]
    mod tests;
}
pub mod schema;
pub mod store {
    pub mod app_store;
    pub mod memory_store;
    pub mod pg_store;
    pub mod ports;
}
pub mod util {
    pub mod auth {
        pub mod jwt;
    }
}

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    if std::env::var("IS_AWS").is_err() {
        dotenvy::dotenv().ok();
    }

    let _log_guard = init_tracing()?;

    info!("Initializing server...");
    server_init_proc(start).await?;

    Ok(())
}
