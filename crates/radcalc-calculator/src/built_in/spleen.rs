//! Spleen length against an age- and sex-indexed upper limit of normal.

use crate::category::{Category, CategoryTable};
use crate::error::CalcResult;
use crate::formatter::{RawOutput, display_decimal, round_to};
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const AGE_BAND_YEARS: i64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Category for Sex {
    const TABLE: &'static CategoryTable =
        &CategoryTable { name: "sex", tags: &["male", "female"], fallback: Some("female") };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpleenInput {
    /// Craniocaudal length in cm
    pub length: f64,
    pub age: i64,
    pub sex: Sex,
}

impl SpleenInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            length: input.number("length")?,
            age: input.integer("age")?,
            sex: input.category("sex")?,
        })
    }

    /// Upper limit of normal length in cm.
    pub fn upper_limit(&self) -> f64 {
        let younger = self.age < AGE_BAND_YEARS;
        match (self.sex, younger) {
            (Sex::Male, true) => 13.0,
            (Sex::Male, false) => 12.5,
            (Sex::Female, true) => 12.0,
            (Sex::Female, false) => 11.5,
        }
    }
}

pub struct SpleenSize;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "spleen-size",
    title: "Spleen Size",
    params: &[
        ParamSpec::required("length", ParamKind::Float),
        ParamSpec::required("age", ParamKind::Integer),
        ParamSpec::required("sex", ParamKind::category::<Sex>()),
    ],
};

impl CalculatorPlugin for SpleenSize {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let spleen = SpleenInput::from_input(input)?;
        let uln = spleen.upper_limit();

        let output = RawOutput::new().float("uln", uln, 1);
        Ok(if spleen.length <= uln {
            output
                .text("assessment", "Normal")
                .text("interpretation", "Spleen size within normal limits")
        } else {
            let excess = display_decimal(round_to(spleen.length - uln, 1));
            output.text("assessment", "Splenomegaly").text(
                "interpretation",
                format!("Splenomegaly detected (exceeds ULN by {excess} cm)"),
            )
        })
    }
}
