use anyhow::anyhow;

pub struct DbConfig {
    db_host: String,
    db_port: Option<u16>,
    db_username: String,
    db_password: String,
    db_name: String,
}

impl DbConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let is_socket_path = std::env::var("DB_HOST")
            .ok()
            .is_some_and(|host| host.starts_with('/'));

        if !is_socket_path && let Ok(db_url) = std::env::var("DB_URL") {
            return Self::from_url(&db_url);
        }

        let db_host = std::env::var("DB_HOST")
            .map_err(|_| anyhow!("Environment variable DB_HOST not found"))?;

        let db_port = if db_host.starts_with('/') {
            None
        } else {
            Some(
                std::env::var("DB_PORT")
                    .map_err(|_| anyhow!("Environment variable DB_PORT not found"))?
                    .parse::<u16>()?,
            )
        };

        let db_username = std::env::var("DB_USERNAME")
            .map_err(|_| anyhow!("Environment variable DB_USERNAME not found"))?;

        let db_password = std::env::var("DB_PASSWORD")
            .map_err(|_| anyhow!("Environment variable DB_PASSWORD not found"))?;

        let db_name = std::env::var("DB_NAME")
            .map_err(|_| anyhow!("Environment variable DB_NAME not found"))?;

        Ok(DbConfig {
            db_host,
            db_port,
            db_username,
            db_password,
            db_name,
        })
    }

    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let separator_pos = url
            .find("://")
            .ok_or_else(|| anyhow!("Invalid URL format"))?;
        let scheme = &url[..separator_pos];
        let rest = &url[separator_pos + 3..];

        match scheme.trim().to_lowercase().as_ref() {
            "postgres" | "psql" | "postgresql" | "pg" => (),
            _ => {
                return Err(anyhow!(
                    "Unsupported DB; only postgreSQL is supported for now."
                ));
            }
        };

        let (credentials, host_and_path) = rest
            .rsplit_once('@')
            .ok_or_else(|| anyhow!("Missing credentials or host"))?;

        let (db_username, db_password) = credentials
            .split_once(':')
            .unwrap_or((credentials, ""));

        let (host_and_port, db_name) = host_and_path
            .split_once('/')
            .unwrap_or((host_and_path, ""));
        if host_and_port.is_empty() {
            return Err(anyhow!("Missing host"));
        }

        let (db_host, db_port) = match host_and_port.split_once(':') {
            Some((host, port)) => (host, Some(port.parse::<u16>()?)),
            None => (host_and_port, Some(5432)),
        };

        Ok(DbConfig {
            db_host: db_host.to_owned(),
            db_port,
            db_username: db_username.to_owned(),
            db_password: db_password.to_owned(),
            db_name: db_name.to_owned(),
        })
    }

    pub fn to_url(&self) -> String {
        // Special handling for Unix Socket
        if self.db_host.starts_with('/') {
            return format!(
                "postgres://{user}:{pw}@/{db}?host={host}",
                user = self.db_username,
                pw = self.db_password,
                db = self.db_name,
                host = self.db_host
            );
        }

        format!(
            "postgres://{user}:{pw}@{host}{port}/{db}",
            user = self.db_username,
            pw = self.db_password,
            host = self.db_host,
            port = match self.db_port {
                Some(port) => format!(":{port}"),
                None => String::new(),
            },
            db = self.db_name
        )
    }
}

pub struct AuthConfig {
    jwt_secret: String,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow!("Environment variable JWT_SECRET not found"))?;

        if jwt_secret.is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        Ok(AuthConfig { jwt_secret })
    }

    pub fn get_jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Unknown STORE_BACKEND: {other}")),
        }
    }
}

pub struct ServerConfig {
    host: String,
    port: u16,
    store_backend: StoreBackend,
    memory_seed_path: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow!("Invalid PORT {port:?}: {e}"))?,
            Err(_) => 3000,
        };
        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => StoreBackend::parse(&raw)?,
            Err(_) => StoreBackend::Postgres,
        };
        let memory_seed_path = std::env::var("MEMORY_STORE_SEED").ok();

        Ok(ServerConfig {
            host,
            port,
            store_backend,
            memory_seed_path,
        })
    }

    pub fn get_bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn get_store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn get_memory_seed_path(&self) -> Option<&str> {
        self.memory_seed_path.as_deref()
    }
}
