//! Workspace configuration model and its validation engine.

pub mod schema;
pub mod validation;

pub use schema::*;
pub use validation::{ValidationResult, Validator, validate};
