//! Entity descriptors: table layout, row decoding, and the per-field setter
//! tables used by partial updates.

mod author;
mod book;

pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};

use crate::error::AppError;
use crate::sql::BindValue;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::any::AnyRow;

/// Assigns one JSON value to one field, coercing it to the field's type.
pub type Setter<T> = fn(&mut T, &Value) -> Result<(), String>;

/// A mutable column of an entity and the setter that writes it.
pub struct Field<T: 'static> {
    pub name: &'static str,
    pub set: Setter<T>,
}

/// A row type stored in its own table with a store-assigned `id`.
pub trait Entity: Serialize + Sized + Send + Sync + Unpin + 'static {
    /// Fully populated create payload.
    type New: Send + Sync;

    const TABLE: &'static str;
    /// Message carried by the 404 body.
    const NOT_FOUND: &'static str;
    /// Mutable columns, in column order. `id` is never listed.
    const FIELDS: &'static [Field<Self>];

    fn id(&self) -> i64;

    /// Current values of `FIELDS`, in the same order.
    fn values(&self) -> Vec<BindValue>;

    /// Values of a create payload, in `FIELDS` order.
    fn new_values(new: &Self::New) -> Vec<BindValue>;

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error>;

    fn columns() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|f| f.name).collect()
    }
}

/// What a partial update did with each key of the payload.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    pub applied: Vec<&'static str>,
    /// Keys that name no mutable field. They are dropped, not rejected.
    pub ignored: Vec<String>,
}

/// Walk `patch` and assign every recognised key through the entity's field table.
/// Stops at the first value that cannot be coerced; the caller must then discard `entity`.
pub fn apply_patch<E: Entity>(
    entity: &mut E,
    patch: &Map<String, Value>,
) -> Result<PatchOutcome, AppError> {
    let mut outcome = PatchOutcome::default();
    for (key, value) in patch {
        match E::FIELDS.iter().find(|f| f.name == key) {
            Some(field) => {
                (field.set)(entity, value).map_err(AppError::Validation)?;
                outcome.applied.push(field.name);
            }
            None => outcome.ignored.push(key.clone()),
        }
    }
    Ok(outcome)
}

/// Integer columns take JSON integers or decimal strings.
pub fn coerce_int(field: &str, v: &Value) -> Result<i64, String> {
    let parsed = match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| format!("{} must be an integer", field))
}

/// Text columns take strings; numbers and booleans are stored in their JSON spelling.
pub fn coerce_text(field: &str, v: &Value) -> Result<String, String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(format!("{} must be a string", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Book {
        Book {
            id: 1,
            title: "Book".into(),
            author_id: 1,
            published_year: 2024,
            isbn: "random".into(),
            pages: 42,
        }
    }

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let mut b = book();
        let outcome = apply_patch(
            &mut b,
            &object(json!({"title": "Book renamed", "isbn": "RANDOM"})),
        )
        .unwrap();
        assert_eq!(b.title, "Book renamed");
        assert_eq!(b.isbn, "RANDOM");
        assert_eq!(b.pages, 42);
        assert_eq!(b.published_year, 2024);
        assert_eq!(outcome.applied.len(), 2);
        assert!(outcome.ignored.is_empty());
    }

    #[test]
    fn unknown_keys_are_collected_and_skipped() {
        let mut b = book();
        let outcome = apply_patch(&mut b, &object(json!({"id": 9, "colour": "red", "pages": 10})))
            .unwrap();
        assert_eq!(b.id, 1);
        assert_eq!(b.pages, 10);
        let mut ignored = outcome.ignored.clone();
        ignored.sort();
        assert_eq!(ignored, vec!["colour".to_string(), "id".to_string()]);
    }

    #[test]
    fn numeric_strings_coerce_into_integer_fields() {
        let mut a = Author {
            id: 1,
            name: "Author".into(),
            birth_year: 1987,
            nationality: "Earth".into(),
        };
        apply_patch(&mut a, &object(json!({"birth_year": "1990", "nationality": 42}))).unwrap();
        assert_eq!(a.birth_year, 1990);
        assert_eq!(a.nationality, "42");
    }

    #[test]
    fn uncoercible_value_is_a_validation_error() {
        let mut b = book();
        let err = apply_patch(&mut b, &object(json!({"pages": "many"}))).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "pages must be an integer"));
        assert!(coerce_int("pages", &json!(4.5)).is_err());
        assert!(coerce_text("title", &Value::Null).is_err());
    }

    #[test]
    fn columns_follow_field_table() {
        assert_eq!(
            Book::columns(),
            vec!["title", "author_id", "published_year", "isbn", "pages"]
        );
        assert_eq!(Author::columns(), vec!["name", "birth_year", "nationality"]);
        assert_eq!(book().values().len(), Book::FIELDS.len());
    }
}
