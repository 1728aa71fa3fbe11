//! `/books` endpoints, including search.

use super::entity::{self, IdPath};
use crate::error::AppError;
use crate::extractors::DbSession;
use crate::model::{Book, NewBook};
use crate::response::NotFoundBody;
use crate::service::{BookSearch, CrudService};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses((status = 200, description = "Every book", body = [Book]))
)]
pub async fn list_books(session: DbSession) -> Result<Json<Vec<Book>>, AppError> {
    entity::list(session).await
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No such book", body = NotFoundBody)
    )
)]
pub async fn get_book(session: DbSession, id: IdPath) -> Result<Json<Book>, AppError> {
    entity::read(session, id).await
}

/// Books matching every supplied criterion. No match is an empty list, not an error.
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookSearch),
    responses((status = 200, description = "Matching books, possibly none", body = [Book]))
)]
pub async fn search_books(
    mut session: DbSession,
    query: Result<Query<BookSearch>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(search) = query?;
    let rows = CrudService::search::<Book>(&mut session, &search.filters()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 200, description = "The stored book with its id", body = Book),
        (status = 422, description = "Missing or mistyped field")
    )
)]
pub async fn create_book(
    session: DbSession,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    entity::create(session, payload).await
}

/// Partial update: any subset of `title`, `author_id`, `published_year`, `isbn`, `pages`;
/// other keys are ignored.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = Object,
    responses(
        (status = 200, description = "The updated book", body = Book),
        (status = 404, description = "No such book", body = NotFoundBody)
    )
)]
pub async fn update_book(
    session: DbSession,
    id: IdPath,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    entity::update(session, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book as it was before deletion", body = Book),
        (status = 404, description = "No such book", body = NotFoundBody)
    )
)]
pub async fn delete_book(session: DbSession, id: IdPath) -> Result<Json<Book>, AppError> {
    entity::delete(session, id).await
}
