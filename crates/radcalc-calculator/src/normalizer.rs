//! Coerces raw string tokens into typed calculator input.
//!
//! Arity is checked before any token is parsed, so a short argument list never
//! produces a partial parse. Optional parameters fall back to their schema
//! default; a blank token counts as not supplied.

use crate::category::{Category, CategoryPolicy};
use crate::error::{CalcError, CalcResult};
use crate::plugin::{CalculatorSpec, ParamKind, ParamSpec, Presence};
use radcalc_types::InputValue;
use std::collections::BTreeMap;
use tracing::warn;

const TRUTHY_TOKENS: [&str; 3] = ["true", "yes", "1"];

/// Typed arguments for one invocation, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedInput {
    values: Vec<(&'static str, InputValue)>,
}

impl NormalizedInput {
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.iter().find(|(key, _)| *key == name).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &InputValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn number(&self, name: &str) -> CalcResult<f64> {
        self.optional_number(name)?.ok_or_else(|| absent(name, "a number"))
    }

    pub fn optional_number(&self, name: &str) -> CalcResult<Option<f64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| mismatch(name, value, "a number")),
        }
    }

    pub fn integer(&self, name: &str) -> CalcResult<i64> {
        self.optional_integer(name)?.ok_or_else(|| absent(name, "an integer"))
    }

    pub fn optional_integer(&self, name: &str) -> CalcResult<Option<i64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => {
                value.as_i64().map(Some).ok_or_else(|| mismatch(name, value, "an integer"))
            }
        }
    }

    pub fn flag(&self, name: &str) -> CalcResult<bool> {
        match self.get(name) {
            None => Err(absent(name, "a flag")),
            Some(value) => value.as_bool().ok_or_else(|| mismatch(name, value, "a flag")),
        }
    }

    pub fn category<C: Category>(&self, name: &str) -> CalcResult<C> {
        let expected = format!("one of {}", C::TABLE.tags.join(", "));
        match self.get(name) {
            None => Err(absent(name, &expected)),
            Some(value) => value
                .as_tag()
                .and_then(C::from_tag)
                .ok_or_else(|| mismatch(name, value, &expected)),
        }
    }
}

impl FromIterator<(&'static str, InputValue)> for NormalizedInput {
    fn from_iter<I: IntoIterator<Item = (&'static str, InputValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

fn absent(name: &str, expected: &str) -> CalcError {
    CalcError::parse(name, "", expected)
}

fn mismatch(name: &str, value: &InputValue, expected: &str) -> CalcError {
    CalcError::parse(name, value.to_string(), format!("{expected}, got {}", value.type_name()))
}

/// `true`, `yes` and `1` (any case) are truthy; every other token is false.
pub fn parse_flag(token: &str) -> bool {
    let token = token.trim();
    TRUTHY_TOKENS.iter().any(|truthy| truthy.eq_ignore_ascii_case(token))
}

/// Normalizes positional arguments against a calculator schema.
pub fn normalize<S: AsRef<str>>(
    spec: &CalculatorSpec,
    raw_args: &[S],
    policy: CategoryPolicy,
) -> CalcResult<NormalizedInput> {
    if raw_args.len() < spec.min_arity() {
        return Err(missing_argument(spec, raw_args.len()));
    }
    if raw_args.len() > spec.params.len() {
        warn!(
            calculator = spec.id,
            supplied = raw_args.len(),
            accepted = spec.params.len(),
            "ignoring extra positional arguments"
        );
    }

    build(spec, policy, |index, _| raw_args.get(index).map(|arg| arg.as_ref()))
}

/// Normalizes arguments keyed by parameter name.
pub fn normalize_named(
    spec: &CalculatorSpec,
    named_args: &BTreeMap<String, String>,
    policy: CategoryPolicy,
) -> CalcResult<NormalizedInput> {
    let supplied_required = spec
        .params
        .iter()
        .filter(|param| param.is_required() && named_args.contains_key(param.name))
        .count();
    if supplied_required < spec.min_arity() {
        return Err(missing_argument(spec, supplied_required));
    }
    for key in named_args.keys() {
        if spec.param(key).is_none() {
            warn!(calculator = spec.id, input = %key, "ignoring unknown named input");
        }
    }

    build(spec, policy, |_, param| named_args.get(param.name).map(String::as_str))
}

fn build<'a>(
    spec: &CalculatorSpec,
    policy: CategoryPolicy,
    token_for: impl Fn(usize, &ParamSpec) -> Option<&'a str>,
) -> CalcResult<NormalizedInput> {
    let mut values = Vec::with_capacity(spec.params.len());

    for (index, param) in spec.params.iter().enumerate() {
        let supplied = token_for(index, param);
        let token = match param.presence {
            Presence::Required => supplied.unwrap_or_default(),
            Presence::Optional { default } => {
                match supplied.filter(|token| !token.trim().is_empty()).or(default) {
                    Some(token) => token,
                    None => continue,
                }
            }
        };
        values.push((param.name, coerce(param, token, policy)?));
    }

    Ok(NormalizedInput { values })
}

fn coerce(param: &ParamSpec, token: &str, policy: CategoryPolicy) -> CalcResult<InputValue> {
    let trimmed = token.trim();
    match param.kind {
        ParamKind::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(InputValue::Float)
            .ok_or_else(|| CalcError::parse(param.name, token, param.kind.describe())),
        ParamKind::Integer => trimmed
            .parse::<i64>()
            .map(InputValue::Integer)
            .map_err(|_| CalcError::parse(param.name, token, param.kind.describe())),
        ParamKind::Flag => Ok(InputValue::Boolean(parse_flag(trimmed))),
        ParamKind::Category { table } => {
            table.resolve(param.name, trimmed, policy).map(InputValue::Tag)
        }
    }
}

fn missing_argument(spec: &CalculatorSpec, received: usize) -> CalcError {
    CalcError::MissingArgument {
        calculator: spec.id.to_string(),
        expected: spec.min_arity(),
        received,
        usage: spec.usage(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTable;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Side {
        Left,
        Right,
    }

    impl Category for Side {
        const TABLE: &'static CategoryTable =
            &CategoryTable { name: "side", tags: &["left", "right"], fallback: Some("left") };

        fn from_tag(tag: &str) -> Option<Self> {
            match tag {
                "left" => Some(Side::Left),
                "right" => Some(Side::Right),
                _ => None,
            }
        }
    }

    static SPEC: CalculatorSpec = CalculatorSpec {
        id: "sample",
        title: "Sample",
        params: &[
            ParamSpec::required("size", ParamKind::Float),
            ParamSpec::required("count", ParamKind::Integer),
            ParamSpec::required("side", ParamKind::category::<Side>()),
            ParamSpec::defaulted("urgent", ParamKind::Flag, "no"),
            ParamSpec::optional("extra", ParamKind::Float),
        ],
    };

    #[test]
    fn short_argument_lists_fail_before_parsing() {
        let err = normalize(&SPEC, &["not-a-number"], CategoryPolicy::Lenient).unwrap_err();
        match err {
            CalcError::MissingArgument { expected, received, usage, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(received, 1);
                assert_eq!(usage, "size count side [urgent=no] [extra]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_typed_values_and_applies_defaults() {
        let input = normalize(&SPEC, &["4.5", "3", "RIGHT"], CategoryPolicy::Lenient).unwrap();
        assert_eq!(input.number("size").unwrap(), 4.5);
        assert_eq!(input.integer("count").unwrap(), 3);
        assert_eq!(input.category::<Side>("side").unwrap(), Side::Right);
        assert!(!input.flag("urgent").unwrap());
        assert_eq!(input.optional_number("extra").unwrap(), None);
        assert_eq!(input.len(), 4);
    }

    #[test]
    fn blank_optional_tokens_count_as_absent() {
        let input =
            normalize(&SPEC, &["1", "1", "left", "", " "], CategoryPolicy::Lenient).unwrap();
        assert!(!input.flag("urgent").unwrap());
        assert!(input.get("extra").is_none());
    }

    #[test]
    fn rejects_unparseable_and_non_finite_numbers() {
        let err = normalize(&SPEC, &["abc", "1", "left"], CategoryPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
        let err = normalize(&SPEC, &["NaN", "1", "left"], CategoryPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
        let err = normalize(&SPEC, &["1", "2.5", "left"], CategoryPolicy::Lenient).unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn flag_tokens_are_case_insensitive() {
        for token in ["true", "YES", "1", " Yes "] {
            assert!(parse_flag(token), "{token} should be truthy");
        }
        for token in ["no", "false", "0", "y", ""] {
            assert!(!parse_flag(token), "{token} should be falsy");
        }
    }

    #[test]
    fn unknown_category_falls_back_unless_strict() {
        let input = normalize(&SPEC, &["1", "1", "up"], CategoryPolicy::Lenient).unwrap();
        assert_eq!(input.category::<Side>("side").unwrap(), Side::Left);
        let err = normalize(&SPEC, &["1", "1", "up"], CategoryPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn extra_positional_arguments_are_ignored() {
        let input =
            normalize(&SPEC, &["1", "1", "left", "yes", "2", "surplus"], CategoryPolicy::Lenient)
                .unwrap();
        assert!(input.flag("urgent").unwrap());
        assert_eq!(input.optional_number("extra").unwrap(), Some(2.0));
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn named_inputs_map_onto_the_schema() {
        let named: BTreeMap<String, String> = [("size", "2"), ("count", "7"), ("side", "right"), ("extra", "9")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let input = normalize_named(&SPEC, &named, CategoryPolicy::Lenient).unwrap();
        assert_eq!(input.integer("count").unwrap(), 7);
        assert_eq!(input.optional_number("extra").unwrap(), Some(9.0));
        assert!(!input.flag("urgent").unwrap());
    }

    #[test]
    fn named_inputs_report_missing_required_parameters() {
        let named: BTreeMap<String, String> =
            [("size".to_string(), "2".to_string())].into_iter().collect();
        let err = normalize_named(&SPEC, &named, CategoryPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), "missing_argument");
    }
}
