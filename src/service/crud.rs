//! Generic CRUD execution against one request-scoped connection.

use crate::error::AppError;
use crate::model::{apply_patch, Entity};
use crate::sql::{
    bind_all, delete_by_id, insert, select_all, select_by_id, select_filtered, update_by_id,
    BindValue, Filter, QueryBuf,
};
use serde_json::{Map, Value};
use sqlx::AnyConnection;
use sqlx::Connection;

pub struct CrudService;

impl CrudService {
    /// Every row, ordered by id.
    pub async fn list_all<E: Entity>(conn: &mut AnyConnection) -> Result<Vec<E>, AppError> {
        let q = select_all(E::TABLE, &E::columns());
        Self::query_many(conn, &q).await
    }

    /// Rows matching all filters. No filters is the same as `list_all`.
    pub async fn search<E: Entity>(
        conn: &mut AnyConnection,
        filters: &[Filter],
    ) -> Result<Vec<E>, AppError> {
        let q = select_filtered(E::TABLE, &E::columns(), filters);
        Self::query_many(conn, &q).await
    }

    /// Fetch one row by id. Returns None when absent.
    pub async fn get_by_id<E: Entity>(
        conn: &mut AnyConnection,
        id: i64,
    ) -> Result<Option<E>, AppError> {
        let q = select_by_id(E::TABLE, &E::columns(), id);
        Self::query_one(conn, &q).await
    }

    /// Insert one row; the store assigns the id. Returns the stored row.
    pub async fn create<E: Entity>(conn: &mut AnyConnection, new: &E::New) -> Result<E, AppError> {
        let q = insert(E::TABLE, &E::columns(), E::new_values(new));
        let row = Self::query_one::<E>(conn, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(table = E::TABLE, id = row.id(), "created");
        Ok(row)
    }

    /// Apply a partial update to one row by id. Unrecognised keys are skipped;
    /// only the recognised ones are written, together, in one transaction.
    /// Returns None when absent.
    pub async fn update<E: Entity>(
        conn: &mut AnyConnection,
        id: i64,
        patch: &Map<String, Value>,
    ) -> Result<Option<E>, AppError> {
        let mut tx = conn.begin().await?;
        let select = select_by_id(E::TABLE, &E::columns(), id);
        let Some(mut entity) = Self::query_one::<E>(&mut *tx, &select).await? else {
            return Ok(None);
        };
        let outcome = apply_patch(&mut entity, patch)?;
        if !outcome.ignored.is_empty() {
            tracing::warn!(table = E::TABLE, id, ignored = ?outcome.ignored, "update ignored unknown fields");
        }
        let Some(q) = patch_query(&entity, &outcome.applied) else {
            tx.commit().await?;
            return Ok(Some(entity));
        };
        let row = Self::query_one::<E>(&mut *tx, &q).await?;
        tx.commit().await?;
        tracing::info!(table = E::TABLE, id, applied = ?outcome.applied, "updated");
        Ok(row)
    }

    /// Delete one row by id. Returns the row as it was, or None when absent.
    pub async fn delete<E: Entity>(
        conn: &mut AnyConnection,
        id: i64,
    ) -> Result<Option<E>, AppError> {
        let q = delete_by_id(E::TABLE, &E::columns(), id);
        let row = Self::query_one(conn, &q).await?;
        if row.is_some() {
            tracing::info!(table = E::TABLE, id, "deleted");
        }
        Ok(row)
    }

    async fn query_one<E: Entity>(
        conn: &mut AnyConnection,
        q: &QueryBuf,
    ) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        row.as_ref().map(E::from_row).transpose().map_err(AppError::Db)
    }

    async fn query_many<E: Entity>(
        conn: &mut AnyConnection,
        q: &QueryBuf,
    ) -> Result<Vec<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&mut *conn)
            .await?;
        rows.iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::Db)
    }
}

/// UPDATE of the columns a patch assigned, valued from the patched entity.
/// None when the patch assigned nothing.
fn patch_query<E: Entity>(entity: &E, applied: &[&'static str]) -> Option<QueryBuf> {
    let changes: Vec<(&str, BindValue)> = E::columns()
        .into_iter()
        .zip(entity.values())
        .filter(|(col, _)| applied.contains(col))
        .collect();
    if changes.is_empty() {
        return None;
    }
    Some(update_by_id(E::TABLE, &E::columns(), entity.id(), changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;

    fn book() -> Book {
        Book {
            id: 3,
            title: "Dune".into(),
            author_id: 1,
            published_year: 1965,
            isbn: "9780441013593".into(),
            pages: 412,
        }
    }

    #[test]
    fn patch_writes_only_applied_columns() {
        let q = patch_query(&book(), &["pages", "title"]).unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "books" SET "title" = $1, "pages" = $2 WHERE "id" = $3 RETURNING "id", "title", "author_id", "published_year", "isbn", "pages""#
        );
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("Dune".into()),
                BindValue::Int(412),
                BindValue::Int(3)
            ]
        );
    }

    #[test]
    fn nothing_applied_means_no_write() {
        assert!(patch_query(&book(), &[]).is_none());
    }
}
