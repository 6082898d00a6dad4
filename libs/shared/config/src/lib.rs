use std::env;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://clinizad.db";
const SQLITE_SCHEME: &str = "sqlite://";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub seed_catalog: bool,
    pub cors_allow_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, defaulting missing values.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                warn!("DATABASE_URL points to PostgreSQL, which is not supported; using {}", DEFAULT_DATABASE_URL);
                DEFAULT_DATABASE_URL.to_string()
            }
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
                DEFAULT_DATABASE_URL.to_string()
            }
        };

        let api_host = lookup("API_HOST").unwrap_or_else(|| {
            warn!("API_HOST not set, using 127.0.0.1");
            "127.0.0.1".to_string()
        });

        let api_port = match lookup("API_PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                warn!("API_PORT is not a valid port, using 8000");
                8000
            }
            None => {
                warn!("API_PORT not set, using 8000");
                8000
            }
        };

        let seed_catalog = lookup("SEED_CATALOG")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string());

        Self {
            database_url,
            api_host,
            api_port,
            seed_catalog,
            cors_allow_origin,
        }
    }

    /// Filesystem path (or `:memory:`) the SQLite store should open.
    pub fn database_path(&self) -> &str {
        match self.database_url.strip_prefix(SQLITE_SCHEME) {
            // sqlite:///./file.db is a relative path
            Some(rest) if rest.starts_with("/./") => &rest[1..],
            Some(rest) => rest,
            None => &self.database_url,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.api_host, self.api_port).parse()
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origin.trim() == "*"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_host: "127.0.0.1".to_string(),
            api_port: 8000,
            seed_catalog: false,
            cors_allow_origin: "*".to_string(),
        }
    }
}
