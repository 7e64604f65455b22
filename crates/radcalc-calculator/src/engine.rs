use crate::category::CategoryPolicy;
use crate::error::CalcResult;
use crate::formatter::{format, report};
use crate::normalizer::{normalize, normalize_named};
use crate::registry::CalculatorRegistry;
use radcalc_types::{ErrorResult, EvaluationResult};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Resolves, normalizes, evaluates and formats one invocation at a time.
///
/// The engine holds no mutable state; a single instance can serve any number
/// of invocations, from any thread.
#[derive(Clone, Copy)]
pub struct Engine {
    registry: &'static CalculatorRegistry,
    policy: CategoryPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine over the built-in registry with lenient category handling.
    pub fn new() -> Self {
        Self { registry: CalculatorRegistry::builtin(), policy: CategoryPolicy::default() }
    }

    pub fn with_policy(mut self, policy: CategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &'static CalculatorRegistry {
        self.registry
    }

    pub fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    /// Evaluates a calculator against positional arguments.
    #[instrument(level = "debug", skip(self, args), fields(args = args.len()))]
    pub fn evaluate<S: AsRef<str>>(
        &self,
        calculator: &str,
        args: &[S],
    ) -> CalcResult<EvaluationResult> {
        let plugin = self.registry.resolve(calculator)?;
        let input = normalize(plugin.spec(), args, self.policy)?;
        debug!(calculator = plugin.name(), inputs = input.len(), "normalized input");
        format(plugin.evaluate(&input)?)
    }

    /// Evaluates a calculator against arguments keyed by parameter name.
    #[instrument(level = "debug", skip(self, inputs), fields(inputs = inputs.len()))]
    pub fn evaluate_named(
        &self,
        calculator: &str,
        inputs: &BTreeMap<String, String>,
    ) -> CalcResult<EvaluationResult> {
        let plugin = self.registry.resolve(calculator)?;
        let input = normalize_named(plugin.spec(), inputs, self.policy)?;
        debug!(calculator = plugin.name(), inputs = input.len(), "normalized named input");
        format(plugin.evaluate(&input)?)
    }

    /// Like [`Engine::evaluate`], with failures already converted to their
    /// result document.
    pub fn run<S: AsRef<str>>(
        &self,
        calculator: &str,
        args: &[S],
    ) -> Result<EvaluationResult, ErrorResult> {
        self.evaluate(calculator, args).map_err(|err| {
            debug!(calculator, kind = err.kind(), error = %err, "evaluation failed");
            report(&err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radcalc_types::FieldValue;

    #[test]
    fn evaluates_through_the_builtin_registry() {
        let result = Engine::new().evaluate("ADRENAL-CT", &["10", "100", "40"]).unwrap();
        assert_eq!(result.get("absolute_washout"), Some(&FieldValue::Float(66.67)));
    }

    #[test]
    fn strict_policy_is_applied_during_normalization() {
        let args = ["1.5", "3.8", "1.2", "massive", "none"];
        assert!(Engine::new().evaluate("child-pugh", &args).is_ok());
        let err = Engine::new()
            .with_policy(CategoryPolicy::Strict)
            .evaluate("child-pugh", &args)
            .unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn run_reports_failures_as_documents() {
        let doc = Engine::new().run("nope", &["1"]).unwrap_err();
        assert_eq!(doc.kind, "unknown_calculator");
        assert_eq!(doc.available.map(|ids| ids.len()), Some(Engine::new().registry().len()));
    }

    #[test]
    fn named_inputs_match_positional_results() {
        let named: BTreeMap<String, String> =
            [("unit_system", "si"), ("albumin", "40"), ("bilirubin", "15")]
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
        let engine = Engine::new();
        assert_eq!(
            engine.evaluate_named("albi", &named).unwrap(),
            engine.evaluate("albi", &["si", "40", "15"]).unwrap()
        );
    }
}
