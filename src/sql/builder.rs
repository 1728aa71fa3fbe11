//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for an entity table.
//!
//! Table and column names come from the static entity descriptors only; every
//! value goes through a `$n` placeholder. The generated SQL is accepted by both
//! PostgreSQL and SQLite.

use super::params::BindValue;

/// Primary key column shared by every table.
pub const ID_COLUMN: &str = "id";

/// Escape character used in LIKE patterns.
const LIKE_ESCAPE: char = '\\';

/// Quote identifier (safe: only from entity descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// One predicate of a filtered SELECT. Predicates are combined with AND.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Column contains the text as a substring (LIKE, store-default case sensitivity).
    Contains(&'static str, String),
    /// Column equals the integer.
    Equals(&'static str, i64),
}

/// Escape LIKE wildcards so the needle is matched literally.
pub fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `"id", "col1", "col2", ...`
fn select_column_list(columns: &[&str]) -> String {
    std::iter::once(ID_COLUMN)
        .chain(columns.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by id.
pub fn select_all(table: &str, columns: &[&str]) -> QueryBuf {
    select_filtered(table, columns, &[])
}

/// SELECT by primary key.
pub fn select_by_id(table: &str, columns: &[&str], id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(columns),
        quoted(table),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// SELECT rows matching all filters, ordered by id. No filters selects everything.
pub fn select_filtered(table: &str, columns: &[&str], filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::with_capacity(filters.len());
    for filter in filters {
        match filter {
            Filter::Contains(col, needle) => {
                let n = q.push_param(BindValue::Text(format!("%{}%", like_escape(needle))));
                where_parts.push(format!(
                    "{} LIKE ${} ESCAPE '{}'",
                    quoted(col),
                    n,
                    LIKE_ESCAPE
                ));
            }
            Filter::Equals(col, value) => {
                let n = q.push_param(BindValue::Int(*value));
                where_parts.push(format!("{} = ${}", quoted(col), n));
            }
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(columns),
        quoted(table),
        where_clause,
        quoted(ID_COLUMN)
    );
    q
}

/// INSERT one row; the id is assigned by the store and returned with the row.
/// `values` are in `columns` order.
pub fn insert(table: &str, columns: &[&str], values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(columns.len(), values.len());
    let mut q = QueryBuf::new();
    let mut placeholders = Vec::with_capacity(values.len());
    for v in values {
        placeholders.push(format!("${}", q.push_param(v)));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table),
        columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", "),
        placeholders.join(", "),
        select_column_list(columns)
    );
    q
}

/// UPDATE the given columns of one row by id, returning the full stored row.
/// Columns not listed in `changes` are left as the store has them.
pub fn update_by_id(
    table: &str,
    columns: &[&str],
    id: i64,
    changes: Vec<(&str, BindValue)>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(changes.len());
    for (col, v) in changes {
        let n = q.push_param(v);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let id_param = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(table),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param,
        select_column_list(columns)
    );
    q
}

/// DELETE by id, returning the row as it was.
pub fn delete_by_id(table: &str, columns: &[&str], id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(table),
        quoted(ID_COLUMN),
        n,
        select_column_list(columns)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLS: &[&str] = &["title", "author_id"];

    #[test]
    fn select_all_orders_by_id_without_where() {
        let q = select_all("books", COLS);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "title", "author_id" FROM "books" ORDER BY "id""#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_are_anded_in_order() {
        let q = select_filtered(
            "books",
            COLS,
            &[
                Filter::Contains("title", "Book".into()),
                Filter::Equals("author_id", 1),
            ],
        );
        assert_eq!(
            q.sql,
            r#"SELECT "id", "title", "author_id" FROM "books" WHERE "title" LIKE $1 ESCAPE '\' AND "author_id" = $2 ORDER BY "id""#
        );
        assert_eq!(
            q.params,
            vec![BindValue::Text("%Book%".into()), BindValue::Int(1)]
        );
    }

    #[test]
    fn empty_needle_matches_everything() {
        let q = select_filtered("books", COLS, &[Filter::Contains("title", String::new())]);
        assert_eq!(q.params, vec![BindValue::Text("%%".into())]);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_escape("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn insert_binds_values_and_returns_row() {
        let q = insert("books", COLS, vec!["Dune".into(), 3.into()]);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "books" ("title", "author_id") VALUES ($1, $2) RETURNING "id", "title", "author_id""#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_puts_id_last() {
        let q = update_by_id(
            "books",
            COLS,
            7,
            vec![("title", "Dune".into()), ("author_id", 3.into())],
        );
        assert_eq!(
            q.sql,
            r#"UPDATE "books" SET "title" = $1, "author_id" = $2 WHERE "id" = $3 RETURNING "id", "title", "author_id""#
        );
        assert_eq!(q.params[2], BindValue::Int(7));
    }

    #[test]
    fn update_sets_only_changed_columns() {
        let q = update_by_id("books", COLS, 7, vec![("author_id", 3.into())]);
        assert_eq!(
            q.sql,
            r#"UPDATE "books" SET "author_id" = $1 WHERE "id" = $2 RETURNING "id", "title", "author_id""#
        );
        assert_eq!(q.params, vec![BindValue::Int(3), BindValue::Int(7)]);
    }

    #[test]
    fn delete_returns_previous_row() {
        let q = delete_by_id("authors", &["name"], 2);
        assert_eq!(
            q.sql,
            r#"DELETE FROM "authors" WHERE "id" = $1 RETURNING "id", "name""#
        );
    }
}
