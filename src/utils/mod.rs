//! Shared utilities: topology validation.

pub mod validation;

pub use validation::{Validator, ValidatorOptions, Violation, ViolationKind};
