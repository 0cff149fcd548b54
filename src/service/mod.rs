//! CrudService: generic CRUD over the document store, plus request validation and defaults.

mod crud;
pub mod defaults;
mod validation;
pub use crud::{not_found, CrudService};
pub use validation::RequestValidator;
