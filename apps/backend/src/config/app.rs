//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;

use crate::config::db::{db_url, must_var};
use crate::error::AppError;

/// Deployment environment; selects the session cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Production,
}

impl RuntimeEnv {
    /// `production` (case-insensitive) selects production, anything else development.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            RuntimeEnv::Production
        } else {
            RuntimeEnv::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeEnv::Production
    }
}

/// Which document store backs the service.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Postgres { url: String },
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Memory => f.write_str("Memory"),
            StoreConfig::Postgres { .. } => f.write_str("Postgres { url: <redacted> }"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: RuntimeEnv,
    pub jwt_secret: String,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!("PORT must be a valid port number, got '{port_str}'"))
        })?;

        let env = RuntimeEnv::parse(&env::var("APP_ENV").unwrap_or_default());

        let jwt_secret = must_var("SECRET_ACCESS_TOKEN")?;

        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreConfig::Memory,
            "postgres" => StoreConfig::Postgres { url: db_url()? },
            other => {
                return Err(AppError::config(format!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                )))
            }
        };

        Ok(Self {
            host,
            port,
            env,
            jwt_secret,
            store,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("env", &self.env)
            .field("jwt_secret", &"<redacted>")
            .field("store", &self.store)
            .finish()
    }
}
