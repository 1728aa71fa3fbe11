//! Runtime settings read from the environment (and `.env` when present).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// SQL dialect, picked from the scheme of `DATABASE_URL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(ConfigError::UnsupportedBackend(scheme.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub backend: Backend,
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub max_connections: u32,
    /// Adds `REFERENCES authors(id)` to `books.author_id` when the schema is created.
    pub enforce_foreign_keys: bool,
    pub max_body_bytes: usize,
}

impl Settings {
    /// Load `.env` (missing file is fine), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let backend = Backend::from_url(&database_url)?;
        Ok(Settings {
            backend,
            database_url,
            bind_addr: vars
                .get("BIND_ADDR")
                .cloned()
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            static_dir: vars
                .get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            max_connections: parse_var(&vars, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            enforce_foreign_keys: parse_var(&vars, "ENFORCE_FOREIGN_KEYS", false)?,
            max_body_bytes: parse_var(&vars, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

fn parse_var<T: FromStr>(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = Settings::from_vars(HashMap::new()).unwrap();
        assert_eq!(settings.backend, Backend::Sqlite);
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.static_dir, PathBuf::from("public"));
        assert_eq!(settings.max_connections, 5);
        assert!(!settings.enforce_foreign_keys);
    }

    #[test]
    fn postgres_url_selects_postgres_backend() {
        let settings = Settings::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/books"),
            ("ENFORCE_FOREIGN_KEYS", "true"),
        ]))
        .unwrap();
        assert_eq!(settings.backend, Backend::Postgres);
        assert!(settings.enforce_foreign_keys);
        assert_eq!(
            Backend::from_url("postgresql://u@h/db").unwrap(),
            Backend::Postgres
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = Settings::from_vars(vars(&[("DATABASE_URL", "mysql://localhost/books")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedBackend(s) if s == "mysql"));
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = Settings::from_vars(vars(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. }));
    }
}
