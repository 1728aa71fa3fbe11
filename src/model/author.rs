use super::{coerce_int, coerce_text, Entity, Field};
use crate::sql::BindValue;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: i64,
    #[schema(max_length = 128)]
    pub name: String,
    pub birth_year: i64,
    #[schema(max_length = 64)]
    pub nationality: String,
}

/// Create payload; every field is required.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewAuthor {
    pub name: String,
    pub birth_year: i64,
    pub nationality: String,
}

fn set_name(a: &mut Author, v: &serde_json::Value) -> Result<(), String> {
    a.name = coerce_text("name", v)?;
    Ok(())
}

fn set_birth_year(a: &mut Author, v: &serde_json::Value) -> Result<(), String> {
    a.birth_year = coerce_int("birth_year", v)?;
    Ok(())
}

fn set_nationality(a: &mut Author, v: &serde_json::Value) -> Result<(), String> {
    a.nationality = coerce_text("nationality", v)?;
    Ok(())
}

impl Entity for Author {
    type New = NewAuthor;

    const TABLE: &'static str = "authors";
    const NOT_FOUND: &'static str = "Author not found!";
    const FIELDS: &'static [Field<Self>] = &[
        Field { name: "name", set: set_name },
        Field { name: "birth_year", set: set_birth_year },
        Field { name: "nationality", set: set_nationality },
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<BindValue> {
        vec![
            self.name.as_str().into(),
            self.birth_year.into(),
            self.nationality.as_str().into(),
        ]
    }

    fn new_values(new: &NewAuthor) -> Vec<BindValue> {
        vec![
            new.name.as_str().into(),
            new.birth_year.into(),
            new.nationality.as_str().into(),
        ]
    }

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Author {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            birth_year: row.try_get("birth_year")?,
            nationality: row.try_get("nationality")?,
        })
    }
}
