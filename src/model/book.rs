use super::{coerce_int, coerce_text, Entity, Field};
use crate::sql::BindValue;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use utoipa::ToSchema;

/// `author_id` is an uninterpreted integer; it may name an author that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    #[schema(max_length = 128)]
    pub title: String,
    pub author_id: i64,
    pub published_year: i64,
    #[schema(max_length = 13)]
    pub isbn: String,
    pub pages: i64,
}

/// Create payload; every field is required.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
    pub published_year: i64,
    pub isbn: String,
    pub pages: i64,
}

fn set_title(b: &mut Book, v: &serde_json::Value) -> Result<(), String> {
    b.title = coerce_text("title", v)?;
    Ok(())
}

fn set_author_id(b: &mut Book, v: &serde_json::Value) -> Result<(), String> {
    b.author_id = coerce_int("author_id", v)?;
    Ok(())
}

fn set_published_year(b: &mut Book, v: &serde_json::Value) -> Result<(), String> {
    b.published_year = coerce_int("published_year", v)?;
    Ok(())
}

fn set_isbn(b: &mut Book, v: &serde_json::Value) -> Result<(), String> {
    b.isbn = coerce_text("isbn", v)?;
    Ok(())
}

fn set_pages(b: &mut Book, v: &serde_json::Value) -> Result<(), String> {
    b.pages = coerce_int("pages", v)?;
    Ok(())
}

impl Entity for Book {
    type New = NewBook;

    const TABLE: &'static str = "books";
    const NOT_FOUND: &'static str = "Book not found!";
    const FIELDS: &'static [Field<Self>] = &[
        Field { name: "title", set: set_title },
        Field { name: "author_id", set: set_author_id },
        Field { name: "published_year", set: set_published_year },
        Field { name: "isbn", set: set_isbn },
        Field { name: "pages", set: set_pages },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<BindValue> {
        vec![
            self.title.as_str().into(),
            self.author_id.into(),
            self.published_year.into(),
            self.isbn.as_str().into(),
            self.pages.into(),
        ]
    }

    fn new_values(new: &NewBook) -> Vec<BindValue> {
        vec![
            new.title.as_str().into(),
            new.author_id.into(),
            new.published_year.into(),
            new.isbn.as_str().into(),
            new.pages.into(),
        ]
    }

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author_id: row.try_get("author_id")?,
            published_year: row.try_get("published_year")?,
            isbn: row.try_get("isbn")?,
            pages: row.try_get("pages")?,
        })
    }
}
