//! CrudService: generic CRUD using the safe SQL builder, plus book search.

mod crud;
mod search;
pub use crud::CrudService;
pub use search::BookSearch;
