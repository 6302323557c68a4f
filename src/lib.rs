//! persond - A strict, schema-driven person API service
//!
//! The interesting work lives in the schema core: declarative object
//! schemas, a coercing validator, and response shaping (merge/project).
//! The HTTP layer is thin glue that feeds raw values into the core.

pub mod api;
pub mod cli;
pub mod people;
pub mod schema;
