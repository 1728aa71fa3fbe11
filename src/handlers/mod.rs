//! HTTP handlers for authors and books.

pub mod authors;
pub mod books;
mod entity;
pub use authors::*;
pub use books::*;
