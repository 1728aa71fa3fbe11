//! Connection pool construction and database creation.

use crate::config::{Backend, Settings};
use crate::error::{AppError, ConfigError};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Build the shared pool. Handlers draw one connection from it per request.
/// With SQLite and enforced foreign keys, every new connection turns on `PRAGMA foreign_keys`.
pub async fn connect(settings: &Settings) -> Result<AnyPool, AppError> {
    sqlx::any::install_default_drivers();
    let mut options = AnyPoolOptions::new().max_connections(settings.max_connections);
    if settings.backend == Backend::Sqlite && settings.enforce_foreign_keys {
        options = options.after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(conn).await?;
                Ok(())
            })
        });
    }
    let pool = options.connect(&settings.database_url).await?;
    tracing::info!(backend = ?settings.backend, "connected to database");
    Ok(pool)
}

/// Ensure the database in a PostgreSQL `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// SQLite URLs are left alone (`mode=rwc` creates the file).
pub async fn ensure_database_exists(settings: &Settings) -> Result<(), AppError> {
    if settings.backend != Backend::Postgres {
        return Ok(());
    }
    let (admin_url, db_name) = parse_db_name_from_url(&settings.database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_url(url.to_string()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn invalid_url(value: String) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_points_at_postgres_database() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/books?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "books");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
