use {
    crate::domain::error::ConfigError,
    std::{env, net::SocketAddr, time::Duration},
};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BACKEND_URL: &str = "http://backend:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/audit.db";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Runtime settings. Every field has a default and an environment override:
///
/// | variable               | default                  |
/// |------------------------|--------------------------|
/// | `PORT`                 | `4000`                   |
/// | `BACKEND_URL`          | `http://backend:8000`    |
/// | `DATABASE_URL`         | `sqlite://data/audit.db` |
/// | `BACKEND_TIMEOUT_SECS` | `30`                     |
///
/// `PY_BACKEND_URL` is still honored when `BACKEND_URL` is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub database_url: String,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let backend_timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "BACKEND_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        let backend_url = lookup("BACKEND_URL")
            .or_else(|| lookup("PY_BACKEND_URL"))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            port,
            backend_url,
            database_url,
            backend_timeout: Duration::from_secs(backend_timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
