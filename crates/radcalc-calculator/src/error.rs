//! Error handling for calculator dispatch and evaluation
//!
//! Every failure an invocation can hit maps onto one `CalcError` variant. The
//! variants stay structured so the reporter can attach the registered
//! identifiers to an unknown-calculator failure, and so callers can branch on
//! `kind()` without parsing messages.

use thiserror::Error;

/// Failure of a single calculator invocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Identifier not present in the registry
    #[error("Unknown calculator: {identifier}")]
    UnknownCalculator { identifier: String, available: Vec<String> },

    /// Fewer arguments than the calculator's minimum arity
    #[error(
        "{calculator} requires at least {expected} argument(s) but {received} were supplied (usage: {calculator} {usage})"
    )]
    MissingArgument { calculator: String, expected: usize, received: usize, usage: String },

    /// A token could not be coerced to the parameter's type
    #[error("Invalid value '{value}' for {parameter}: expected {expected}")]
    Parse { parameter: String, value: String, expected: String },

    /// Arithmetic domain violation (division by zero, log of a non-positive value)
    #[error("Computation error: {message}")]
    Computation { message: String },

    /// A mode/model argument matched none of the recognized options
    #[error("Unknown {parameter} '{value}'. Use one of: {}", .options.join(", "))]
    ModelSelection { parameter: String, value: String, options: Vec<String> },
}

impl CalcError {
    /// Stable error kind for result documents and logs
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::UnknownCalculator { .. } => "unknown_calculator",
            CalcError::MissingArgument { .. } => "missing_argument",
            CalcError::Parse { .. } => "parse_error",
            CalcError::Computation { .. } => "computation_error",
            CalcError::ModelSelection { .. } => "model_selection",
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        CalcError::Computation { message: message.into() }
    }

    pub fn parse(
        parameter: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        CalcError::Parse {
            parameter: parameter.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
