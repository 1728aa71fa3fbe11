//! Create the `authors` and `books` tables. Idempotent (IF NOT EXISTS); must finish
//! before the listener accepts traffic.

use crate::config::Backend;
use crate::error::AppError;
use sqlx::AnyPool;

/// Auto-assigned integer primary key, per dialect.
fn id_column(backend: Backend) -> &'static str {
    match backend {
        Backend::Postgres => "\"id\" BIGSERIAL PRIMARY KEY",
        Backend::Sqlite => "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT",
    }
}

/// DDL statements in dependency order.
pub fn schema_ddl(backend: Backend, enforce_foreign_keys: bool) -> Vec<String> {
    let author_ref = if enforce_foreign_keys {
        " REFERENCES \"authors\" (\"id\")"
    } else {
        ""
    };
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS \"authors\" (\n  {},\n  \"name\" VARCHAR(128) NOT NULL,\n  \"birth_year\" BIGINT NOT NULL,\n  \"nationality\" VARCHAR(64) NOT NULL\n)",
            id_column(backend)
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS \"books\" (\n  {},\n  \"title\" VARCHAR(128) NOT NULL,\n  \"author_id\" BIGINT NOT NULL{},\n  \"published_year\" BIGINT NOT NULL,\n  \"isbn\" VARCHAR(13) NOT NULL,\n  \"pages\" BIGINT NOT NULL\n)",
            id_column(backend),
            author_ref
        ),
    ]
}

pub async fn ensure_schema(
    pool: &AnyPool,
    backend: Backend,
    enforce_foreign_keys: bool,
) -> Result<(), AppError> {
    for ddl in schema_ddl(backend, enforce_foreign_keys) {
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(?backend, enforce_foreign_keys, "schema ready");
    Ok(())
}
