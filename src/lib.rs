//! Bookshelf: REST backend for authors and books.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Backend, Settings};
pub use error::{AppError, ConfigError};
pub use migration::ensure_schema;
pub use model::{Author, Book, Entity, NewAuthor, NewBook};
pub use routes::build_router;
pub use service::{BookSearch, CrudService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
