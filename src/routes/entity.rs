//! Entity CRUD routes.
//! `/books/search` is a static segment, so it wins over `/books/:id`.

use crate::handlers::{
    create_author, create_book, delete_author, delete_book, get_author, get_book, list_authors,
    list_books, search_books, update_author, update_book,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn author_routes(state: AppState) -> Router {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/:id",
            get(get_author).put(update_author).delete(delete_author),
        )
        .with_state(state)
}

pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search_books))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(state)
}
