use std::sync::Arc;

use axum::Router;
use introspens::{
    activity::InMemoryActivityRepository, build_router, content::InMemoryContentRepository,
    user::InMemoryUserRepository, AppConfig, AppState,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub state: AppState,
    pub router: Router,
}

pub struct TestSetupBuilder {
    config: AppConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_ranking_limit(mut self, limit: usize) -> Self {
        self.config.ranking_limit = limit;
        self
    }

    pub fn build(self) -> TestSetup {
        let state = AppState::new(
            self.config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryActivityRepository::new()),
            Arc::new(InMemoryContentRepository::new()),
        );
        let router = build_router(state.clone());

        TestSetup { state, router }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
