//! Result formatting and error reporting.
//!
//! Evaluators emit a [`RawOutput`] where every float carries the precision it
//! must be reported at. [`format`] applies that rounding and is the only way to
//! build an [`EvaluationResult`] from evaluator output, so no float leaves the
//! engine unrounded.

use crate::error::{CalcError, CalcResult};
use radcalc_types::{ErrorResult, EvaluationResult, FieldValue};

#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Float { value: f64, precision: u32 },
    Integer(i64),
    Text(String),
    Flag(bool),
}

/// Ordered, unrounded evaluator output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawOutput {
    fields: Vec<(&'static str, RawValue)>,
}

impl RawOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a float reported at `precision` decimal places.
    pub fn float(mut self, name: &'static str, value: f64, precision: u32) -> Self {
        self.fields.push((name, RawValue::Float { value, precision }));
        self
    }

    pub fn integer(mut self, name: &'static str, value: i64) -> Self {
        self.fields.push((name, RawValue::Integer(value)));
        self
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, RawValue::Text(value.into())));
        self
    }

    pub fn flag(mut self, name: &'static str, value: bool) -> Self {
        self.fields.push((name, RawValue::Flag(value)));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Rounds the exact binary value to `precision` decimal places.
///
/// Only exact ties (such as `0.125`) go to even. A literal like `9.555` is
/// stored slightly below the tie and so rounds to `9.55`.
pub fn round_to(value: f64, precision: u32) -> f64 {
    format!("{value:.*}", precision as usize).parse().unwrap_or(value)
}

/// Renders an already-rounded number the way result labels quote it: whole
/// numbers keep one decimal place (`2.0`), others print as-is (`1.5`).
pub fn display_decimal(value: f64) -> String {
    if value.fract() == 0.0 { format!("{value:.1}") } else { format!("{value}") }
}

/// Applies per-field rounding and produces the result document.
pub fn format(raw: RawOutput) -> CalcResult<EvaluationResult> {
    raw.fields
        .into_iter()
        .map(|(name, value)| {
            let field = match value {
                RawValue::Float { value, precision } => {
                    let rounded = round_to(value, precision);
                    if !rounded.is_finite() {
                        return Err(CalcError::computation(format!(
                            "{name} is not a finite number"
                        )));
                    }
                    FieldValue::Float(rounded)
                }
                RawValue::Integer(value) => FieldValue::Integer(value),
                RawValue::Text(value) => FieldValue::Text(value),
                RawValue::Flag(value) => FieldValue::Boolean(value),
            };
            Ok((name.to_string(), field))
        })
        .collect()
}

/// Converts a failure into its result document, message verbatim.
pub fn report(err: &CalcError) -> ErrorResult {
    let available = match err {
        CalcError::UnknownCalculator { available, .. } => Some(available.clone()),
        _ => None,
    };
    ErrorResult { message: err.to_string(), kind: err.kind().to_string(), available }
}
