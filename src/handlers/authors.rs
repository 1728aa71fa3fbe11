//! `/authors` endpoints.

use super::entity::{self, IdPath};
use crate::error::AppError;
use crate::extractors::DbSession;
use crate::model::{Author, NewAuthor};
use crate::response::NotFoundBody;
use axum::{
    extract::rejection::JsonRejection,
    Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses((status = 200, description = "Every author", body = [Author]))
)]
pub async fn list_authors(session: DbSession) -> Result<Json<Vec<Author>>, AppError> {
    entity::list(session).await
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author", body = Author),
        (status = 404, description = "No such author", body = NotFoundBody)
    )
)]
pub async fn get_author(session: DbSession, id: IdPath) -> Result<Json<Author>, AppError> {
    entity::read(session, id).await
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = NewAuthor,
    responses(
        (status = 200, description = "The stored author with its id", body = Author),
        (status = 422, description = "Missing or mistyped field")
    )
)]
pub async fn create_author(
    session: DbSession,
    payload: Result<Json<NewAuthor>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    entity::create(session, payload).await
}

/// Partial update: any subset of `name`, `birth_year`, `nationality`; other keys are ignored.
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = Object,
    responses(
        (status = 200, description = "The updated author", body = Author),
        (status = 404, description = "No such author", body = NotFoundBody)
    )
)]
pub async fn update_author(
    session: DbSession,
    id: IdPath,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    entity::update(session, id, payload).await
}

/// Books keep their `author_id` after the author is gone.
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author as it was before deletion", body = Author),
        (status = 404, description = "No such author", body = NotFoundBody)
    )
)]
pub async fn delete_author(
    session: DbSession,
    id: IdPath,
) -> Result<Json<Author>, AppError> {
    entity::delete(session, id).await
}
