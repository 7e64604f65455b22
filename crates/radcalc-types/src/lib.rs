//! Radcalc Types
//!
//! This crate defines the value types shared across the radcalc workspace
//! (currently `radcalc-calculator` and `radcalc-cli`): the normalized input
//! values a calculator consumes, and the ordered result/error documents it
//! produces.

#![deny(missing_docs)]

mod types;
pub use types::{ErrorResult, EvaluationResult, FieldValue, InputValue};
