//! Graf classification of infant hip ultrasound.

use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

/// Angles in degrees, coverage in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HipInput {
    pub alpha: f64,
    pub beta: f64,
    pub coverage: f64,
}

impl HipInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            alpha: input.number("alpha")?,
            beta: input.number("beta")?,
            coverage: input.number("coverage")?,
        })
    }

    /// (classification, interpretation); branches are checked in order.
    pub fn classify(&self) -> (&'static str, &'static str) {
        let (alpha, beta) = (self.alpha, self.beta);
        if alpha > 60.0 && beta < 55.0 {
            ("Type Ia (Normal)", "Normal hip development")
        } else if (50.0..=60.0).contains(&alpha) && beta < 77.0 {
            ("Type II (Physiologic immaturity)", "Physiologic immaturity, follow-up recommended")
        } else if (43.0..50.0).contains(&alpha) && beta > 77.0 {
            ("Type III (Dysplastic)", "Hip dysplasia, treatment required")
        } else {
            (
                "Type IV (Decentered/Dislocated)",
                "Severe dysplasia or dislocation, immediate treatment required",
            )
        }
    }
}

pub struct HipDysplasia;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "hip-dysplasia",
    title: "Hip Dysplasia (Graf)",
    params: &[
        ParamSpec::required("alpha", ParamKind::Float),
        ParamSpec::required("beta", ParamKind::Float),
        ParamSpec::required("coverage", ParamKind::Float),
    ],
};

impl CalculatorPlugin for HipDysplasia {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let hip = HipInput::from_input(input)?;
        let (classification, interpretation) = hip.classify();

        Ok(RawOutput::new()
            .text("classification", classification)
            .float("alpha_angle", hip.alpha, 2)
            .float("beta_angle", hip.beta, 2)
            .float("femoral_coverage", hip.coverage, 2)
            .text("interpretation", interpretation))
    }
}
