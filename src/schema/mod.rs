//! Schema validation core for persond
//!
//! Declarative object schemas validated against untyped JSON input.
//!
//! # Design Principles
//!
//! - Schemas are process-start static data
//! - Validation walks fields in schema order
//! - All field problems are collected into one aggregate error
//! - Records come only from validation, merging, or projection
//! - Pure functions: no I/O, no shared mutable state

mod errors;
mod shaper;
mod types;
mod validator;

pub use errors::{Problem, ProblemKind, ValidationError, ValidationResult};
pub use shaper::{merge, project};
pub use types::{Constraints, EnumSchema, FieldKind, FieldSpec, ObjectSchema, Record, ValueFormat};
pub use validator::validate;
