//! Questionnaire sum scores: IPSS and SHIM (IIEF-5).

use crate::error::{CalcError, CalcResult};
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const IPSS_QUESTIONS: [&str; 7] = ["q1", "q2", "q3", "q4", "q5", "q6", "q7"];
const SHIM_QUESTIONS: [&str; 5] = ["q1", "q2", "q3", "q4", "q5"];
const IPSS_QOL_MAX: i64 = 6;

fn sum_responses(input: &NormalizedInput, questions: &[&str]) -> CalcResult<i64> {
    questions.iter().try_fold(0i64, |total, question| {
        total
            .checked_add(input.integer(question)?)
            .ok_or_else(|| CalcError::computation("response total overflows"))
    })
}

/// International Prostate Symptom Score responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpssInput {
    pub total: i64,
    pub quality_of_life: Option<i64>,
}

impl IpssInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            total: sum_responses(input, &IPSS_QUESTIONS)?,
            quality_of_life: input.optional_integer("q8")?,
        })
    }
}

/// (severity, management)
pub fn ipss_severity(total: i64) -> (&'static str, &'static str) {
    match total {
        i64::MIN..=7 => ("Mild", "Watchful waiting"),
        8..=19 => ("Moderate", "Medical therapy recommended"),
        _ => ("Severe", "Medical/surgical intervention"),
    }
}

pub struct Ipss;

static IPSS_SPEC: CalculatorSpec = CalculatorSpec {
    id: "ipss",
    title: "International Prostate Symptom Score",
    params: &[
        ParamSpec::required("q1", ParamKind::Integer),
        ParamSpec::required("q2", ParamKind::Integer),
        ParamSpec::required("q3", ParamKind::Integer),
        ParamSpec::required("q4", ParamKind::Integer),
        ParamSpec::required("q5", ParamKind::Integer),
        ParamSpec::required("q6", ParamKind::Integer),
        ParamSpec::required("q7", ParamKind::Integer),
        ParamSpec::optional("q8", ParamKind::Integer),
    ],
};

impl CalculatorPlugin for Ipss {
    fn spec(&self) -> &'static CalculatorSpec {
        &IPSS_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let ipss = IpssInput::from_input(input)?;
        let (severity, management) = ipss_severity(ipss.total);

        let output = RawOutput::new()
            .integer("total_score", ipss.total)
            .text("severity", severity)
            .text("management", management);
        Ok(match ipss.quality_of_life {
            Some(qol) => output.text("qol_score", format!("{qol}/{IPSS_QOL_MAX}")),
            None => output,
        })
    }
}

pub fn shim_interpretation(total: i64) -> &'static str {
    match total {
        22..=i64::MAX => "No erectile dysfunction",
        17..=21 => "Mild erectile dysfunction",
        12..=16 => "Mild to moderate erectile dysfunction",
        8..=11 => "Moderate erectile dysfunction",
        _ => "Severe erectile dysfunction",
    }
}

pub struct Shim;

static SHIM_SPEC: CalculatorSpec = CalculatorSpec {
    id: "shim",
    title: "Sexual Health Inventory for Men",
    params: &[
        ParamSpec::required("q1", ParamKind::Integer),
        ParamSpec::required("q2", ParamKind::Integer),
        ParamSpec::required("q3", ParamKind::Integer),
        ParamSpec::required("q4", ParamKind::Integer),
        ParamSpec::required("q5", ParamKind::Integer),
    ],
};

impl CalculatorPlugin for Shim {
    fn spec(&self) -> &'static CalculatorSpec {
        &SHIM_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let total = sum_responses(input, &SHIM_QUESTIONS)?;

        Ok(RawOutput::new()
            .integer("total_score", total)
            .text("interpretation", shim_interpretation(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryPolicy;
    use crate::formatter::format;
    use crate::normalizer::normalize;
    use radcalc_types::{EvaluationResult, FieldValue};

    fn run(plugin: &dyn CalculatorPlugin, args: &[&str]) -> EvaluationResult {
        let input = normalize(plugin.spec(), args, CategoryPolicy::Lenient).unwrap();
        format(plugin.evaluate(&input).unwrap()).unwrap()
    }

    #[test]
    fn ipss_moderate_with_quality_of_life() {
        let result = run(&Ipss, &["2", "2", "2", "2", "2", "2", "2", "4"]);
        assert_eq!(result.get("total_score"), Some(&FieldValue::Integer(14)));
        assert_eq!(result.get("severity"), Some(&FieldValue::from("Moderate")));
        assert_eq!(
            result.get("management"),
            Some(&FieldValue::from("Medical therapy recommended"))
        );
        assert_eq!(result.get("qol_score"), Some(&FieldValue::from("4/6")));
    }

    #[test]
    fn ipss_omits_quality_of_life_when_not_supplied() {
        let result = run(&Ipss, &["1", "1", "1", "1", "1", "1", "1"]);
        assert_eq!(result.get("severity"), Some(&FieldValue::from("Mild")));
        assert_eq!(result.get("qol_score"), None);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn ipss_requires_seven_responses() {
        let err = normalize(Ipss.spec(), &["1", "1", "1"], CategoryPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), "missing_argument");
        assert!(err.to_string().contains("requires at least 7"));
    }

    #[test]
    fn ipss_severe_band() {
        assert_eq!(ipss_severity(20).0, "Severe");
        assert_eq!(ipss_severity(19).0, "Moderate");
    }

    #[test]
    fn shim_bands() {
        let result = run(&Shim, &["5", "5", "4", "4", "4"]);
        assert_eq!(result.get("total_score"), Some(&FieldValue::Integer(22)));
        assert_eq!(result.get("interpretation"), Some(&FieldValue::from("No erectile dysfunction")));

        assert_eq!(shim_interpretation(17), "Mild erectile dysfunction");
        assert_eq!(shim_interpretation(12), "Mild to moderate erectile dysfunction");
        assert_eq!(shim_interpretation(8), "Moderate erectile dysfunction");
        assert_eq!(shim_interpretation(7), "Severe erectile dysfunction");
    }

    #[test]
    fn non_integer_response_is_a_parse_error() {
        let input = normalize(Shim.spec(), &["5", "5", "4.5", "4", "4"], CategoryPolicy::Lenient);
        assert_eq!(input.unwrap_err().kind(), "parse_error");
    }
}
