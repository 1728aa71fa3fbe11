//! Request-scoped database session.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::any::Any;
use sqlx::AnyConnection;
use sqlx::pool::PoolConnection;
use std::ops::{Deref, DerefMut};

/// One pooled connection, held for the duration of a single request and
/// returned to the pool when the handler finishes, whatever the outcome.
pub struct DbSession(PoolConnection<Any>);

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.pool.acquire().await?;
        Ok(DbSession(conn))
    }
}

impl Deref for DbSession {
    type Target = AnyConnection;

    fn deref(&self) -> &AnyConnection {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut AnyConnection {
        &mut self.0
    }
}
