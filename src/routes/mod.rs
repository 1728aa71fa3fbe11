//! Route groups and the assembled application router.

mod common;
mod entity;

pub use common::{common_routes, page_routes};
pub use entity::{author_routes, book_routes};

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Entity, operational and static routes with request tracing and a body size limit.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(page_routes(&settings.static_dir))
        .merge(common_routes(state.clone()))
        .merge(author_routes(state.clone()))
        .merge(book_routes(state))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
}
