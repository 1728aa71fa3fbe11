//! Shared application state for all routes.

use sqlx::AnyPool;

#[derive(Clone)]
pub struct AppState {
    /// Handlers never use the pool directly; each request takes one
    /// connection through the `DbSession` extractor.
    pub pool: AnyPool,
}

impl AppState {
    pub fn new(pool: AnyPool) -> Self {
        AppState { pool }
    }
}
