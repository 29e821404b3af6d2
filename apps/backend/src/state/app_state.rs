use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::cookie::CookiePolicy;
use crate::store::DocumentStore;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Document store handle shared by every worker
    pub store: Arc<dyn DocumentStore>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Attributes applied to the session cookie
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, security: SecurityConfig, cookies: CookiePolicy) -> Self {
        Self {
            store,
            security,
            cookies,
        }
    }
}
