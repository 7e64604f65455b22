//! Clinical calculator evaluation engine.
//!
//! A fixed registry of pure evaluators, each implementing one clinical formula
//! and its categorical interpretation, behind a uniform
//! resolve / normalize / evaluate / format pipeline. [`Engine`] drives the
//! pipeline; the individual stages are public for callers that need them.

pub mod built_in;
pub mod category;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod normalizer;
pub mod plugin;
pub mod registry;

pub use category::{Category, CategoryPolicy, CategoryTable};
pub use engine::Engine;
pub use error::{CalcError, CalcResult};
pub use formatter::{RawOutput, format, report};
pub use normalizer::{NormalizedInput, normalize, normalize_named};
pub use plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec, Presence};
pub use registry::CalculatorRegistry;

pub use radcalc_types::{ErrorResult, EvaluationResult, FieldValue, InputValue};
