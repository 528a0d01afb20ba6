pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod schema;
pub mod validation;

pub use batch::{validate_all, validate_document, validate_one};
pub use schema::load_schema;
