use crate::category::{Category, CategoryTable};
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use serde::Serialize;

/// Expected type of a positional argument.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    Float,
    Integer,
    /// `true`/`yes`/`1` (any case) are truthy, anything else is false.
    Flag,
    Category {
        table: &'static CategoryTable,
    },
}

impl ParamKind {
    pub const fn category<C: Category>() -> Self {
        ParamKind::Category { table: C::TABLE }
    }

    pub fn describe(&self) -> String {
        match self {
            ParamKind::Float => "a number".to_string(),
            ParamKind::Integer => "an integer".to_string(),
            ParamKind::Flag => "a flag".to_string(),
            ParamKind::Category { table } => format!("one of {}", table.tags.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    /// Trailing parameter; `default` is the raw token used when it is not supplied.
    Optional { default: Option<&'static str> },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub presence: Presence,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self { name, kind, presence: Presence::Required }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self { name, kind, presence: Presence::Optional { default: None } }
    }

    pub const fn defaulted(name: &'static str, kind: ParamKind, default: &'static str) -> Self {
        Self { name, kind, presence: Presence::Optional { default: Some(default) } }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

/// Static description of one calculator: identifier plus positional schema.
///
/// Required parameters always precede optional ones, so the minimum arity is
/// the number of required parameters.
#[derive(Debug, Serialize)]
pub struct CalculatorSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub params: &'static [ParamSpec],
}

impl CalculatorSpec {
    pub fn min_arity(&self) -> usize {
        self.params.iter().filter(|param| param.is_required()).count()
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Positional signature, e.g. `radius exophytic nearness location [hilar=no]`.
    pub fn usage(&self) -> String {
        self.params
            .iter()
            .map(|param| match param.presence {
                Presence::Required => param.name.to_string(),
                Presence::Optional { default: Some(default) } => {
                    format!("[{}={}]", param.name, default)
                }
                Presence::Optional { default: None } => format!("[{}]", param.name),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A trait for calculator plugins.
///
/// Plugins are stateless; `evaluate` must be a pure function of its input.
pub trait CalculatorPlugin: Send + Sync {
    /// The calculator's schema.
    fn spec(&self) -> &'static CalculatorSpec;

    /// The registry identifier.
    fn name(&self) -> &'static str {
        self.spec().id
    }

    /// Applies the formula and classification to normalized input.
    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput>;
}
