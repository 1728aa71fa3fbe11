//! OpenAPI document for the entity endpoints, served at `GET /openapi.json`.

use crate::handlers::{authors, books};
use crate::model::{Author, Book, NewAuthor, NewBook};
use crate::response::NotFoundBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        books::list_books,
        books::get_book,
        books::search_books,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(schemas(Author, NewAuthor, Book, NewBook, NotFoundBody)),
    tags(
        (name = "authors", description = "Authors"),
        (name = "books", description = "Books and book search")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/authors",
            "/authors/{id}",
            "/books",
            "/books/{id}",
            "/books/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
