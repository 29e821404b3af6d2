use std::sync::Arc;

use crate::auth::cookie::CookiePolicy;
use crate::config::app::{RuntimeEnv, StoreConfig};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

enum StoreSource {
    Config(StoreConfig),
    Handle(Arc<dyn DocumentStore>),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    security_config: Option<SecurityConfig>,
    store: StoreSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Development,
            security_config: None,
            store: StoreSource::Config(StoreConfig::Memory),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = StoreSource::Config(store);
        self
    }

    /// Use an already-constructed store, e.g. one a test wants to inspect afterwards.
    pub fn with_store_handle(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = StoreSource::Handle(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("A signing secret is required to build state"))?;
        if security.jwt_secret.is_empty() {
            return Err(AppError::config("The signing secret must not be empty"));
        }

        let store: Arc<dyn DocumentStore> = match self.store {
            StoreSource::Handle(store) => store,
            StoreSource::Config(StoreConfig::Memory) => Arc::new(MemoryDocumentStore::new()),
            StoreSource::Config(StoreConfig::Postgres { url }) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(&url).await?;
                Arc::new(PgDocumentStore::new(conn))
            }
        };

        Ok(AppState::new(
            store,
            security,
            CookiePolicy::for_env(self.env),
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
