use std::sync::Arc;

use wisdom_center::config::app::RuntimeEnv;
use wisdom_center::infra::state::build_state;
use wisdom_center::state::app_state::AppState;
use wisdom_center::state::security_config::SecurityConfig;
use wisdom_center::store::MemoryDocumentStore;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// App state over an in-memory store the test can still inspect.
pub struct TestState {
    pub state: AppState,
    pub store: Arc<MemoryDocumentStore>,
}

impl TestState {
    pub fn security(&self) -> &SecurityConfig {
        &self.state.security
    }
}

pub async fn memory_state() -> TestState {
    memory_state_for(RuntimeEnv::Development).await
}

pub async fn memory_state_for(env: RuntimeEnv) -> TestState {
    let store = Arc::new(MemoryDocumentStore::new());
    let state = build_state()
        .with_env(env)
        .with_security(SecurityConfig::new(TEST_SECRET.as_bytes()))
        .with_store_handle(store.clone())
        .build()
        .await
        .expect("memory state should build");

    TestState { state, store }
}
