//! Batch evaluation of JSON case files.
//!
//! A case file is a JSON array of objects:
//!
//! ```json
//! [
//!   { "name": "washout", "calculator": "adrenal-ct", "args": [10, 100, 40] },
//!   { "calculator": "albi", "inputs": { "unit_system": "si", "albumin": 40, "bilirubin": 15 } }
//! ]
//! ```
//!
//! `args` are positional; `inputs` are keyed by parameter name and take
//! precedence when both are present. Every case is evaluated independently.

use anyhow::Context;
use radcalc_calculator::{Engine, report};
use radcalc_types::{ErrorResult, EvaluationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A scalar argument as written in the case file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArgToken {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl ArgToken {
    pub fn into_token(self) -> String {
        match self {
            ArgToken::Flag(value) => value.to_string(),
            ArgToken::Number(value) => value.to_string(),
            ArgToken::Text(value) => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchCase {
    #[serde(default)]
    pub name: Option<String>,
    pub calculator: String,
    #[serde(default)]
    pub args: Vec<ArgToken>,
    #[serde(default)]
    pub inputs: BTreeMap<String, ArgToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(EvaluationResult),
    Error(ErrorResult),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub calculator: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl CaseOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

pub fn load_cases(path: &Path) -> anyhow::Result<Vec<BatchCase>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse batch file '{}'", path.display()))
}

pub fn evaluate_case(engine: &Engine, index: usize, case: BatchCase) -> CaseOutcome {
    let name = case.name.unwrap_or_else(|| format!("case-{}", index + 1));

    let evaluated = if case.inputs.is_empty() {
        let args: Vec<String> = case.args.into_iter().map(ArgToken::into_token).collect();
        engine.evaluate(&case.calculator, args.as_slice())
    } else {
        if !case.args.is_empty() {
            warn!(case = %name, "both args and inputs supplied, using inputs");
        }
        let inputs: BTreeMap<String, String> =
            case.inputs.into_iter().map(|(key, value)| (key, value.into_token())).collect();
        engine.evaluate_named(&case.calculator, &inputs)
    };

    let outcome = match evaluated {
        Ok(result) => Outcome::Result(result),
        Err(err) => {
            warn!(case = %name, calculator = %case.calculator, kind = err.kind(), error = %err, "case failed");
            Outcome::Error(report(&err))
        }
    };
    CaseOutcome { name, calculator: case.calculator, outcome }
}

pub fn run(engine: &Engine, cases: Vec<BatchCase>) -> Vec<CaseOutcome> {
    let outcomes: Vec<CaseOutcome> = cases
        .into_iter()
        .enumerate()
        .map(|(index, case)| evaluate_case(engine, index, case))
        .collect();

    let failed = outcomes.iter().filter(|outcome| outcome.is_error()).count();
    info!(cases = outcomes.len(), failed, "batch complete");
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cases(value: serde_json::Value) -> Vec<BatchCase> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tokens_render_like_command_line_arguments() {
        let args: Vec<ArgToken> = serde_json::from_value(json!([40, 1.5, true, "none"])).unwrap();
        let tokens: Vec<String> = args.into_iter().map(ArgToken::into_token).collect();
        assert_eq!(tokens, vec!["40", "1.5", "true", "none"]);
    }

    #[test]
    fn positional_and_named_cases() {
        let outcomes = run(
            &Engine::new(),
            cases(json!([
                { "name": "washout", "calculator": "adrenal-ct", "args": [10, 100, 40] },
                { "calculator": "albi", "inputs": { "unit_system": "si", "albumin": 40, "bilirubin": 15 } }
            ])),
        );

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "washout");
        assert_eq!(outcomes[1].name, "case-2");
        assert!(outcomes.iter().all(|outcome| !outcome.is_error()));

        let value = serde_json::to_value(&outcomes[1]).unwrap();
        assert_eq!(value["calculator"], json!("albi"));
        assert_eq!(value["result"]["albi_score"], json!(-2.632));
    }

    #[test]
    fn failures_are_isolated_per_case() {
        let outcomes = run(
            &Engine::new(),
            cases(json!([
                { "calculator": "tirads", "args": [1] },
                { "calculator": "shim", "args": [5, 5, 5, 5, 5] }
            ])),
        );

        assert!(outcomes[0].is_error());
        assert!(!outcomes[1].is_error());
        let value = serde_json::to_value(&outcomes[0]).unwrap();
        assert_eq!(value["error"]["kind"], json!("unknown_calculator"));
        assert!(value.get("result").is_none());
    }
}
