//! Albumin-Bilirubin (ALBI) grade.

use super::checked_log10;
use crate::category::{Category, CategoryTable};
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const BILIRUBIN_MG_DL_TO_UMOL_L: f64 = 17.104;
const ALBUMIN_G_DL_TO_G_L: f64 = 10.0;

const BILIRUBIN_COEFFICIENT: f64 = 0.66;
const ALBUMIN_COEFFICIENT: f64 = -0.0852;

const GRADE_1_MAX: f64 = -2.60;
const GRADE_2_MAX: f64 = -1.39;

/// Units the lab values are supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Albumin g/L, bilirubin µmol/L
    Si,
    /// Albumin g/dL, bilirubin mg/dL
    Us,
}

impl Category for UnitSystem {
    const TABLE: &'static CategoryTable =
        &CategoryTable { name: "unit_system", tags: &["si", "us"], fallback: Some("si") };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "si" => Some(UnitSystem::Si),
            "us" => Some(UnitSystem::Us),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbiInput {
    pub units: UnitSystem,
    pub albumin: f64,
    pub bilirubin: f64,
}

impl AlbiInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            units: input.category("unit_system")?,
            albumin: input.number("albumin")?,
            bilirubin: input.number("bilirubin")?,
        })
    }

    /// (albumin g/L, bilirubin µmol/L)
    fn in_si_units(&self) -> (f64, f64) {
        match self.units {
            UnitSystem::Si => (self.albumin, self.bilirubin),
            UnitSystem::Us => {
                (self.albumin * ALBUMIN_G_DL_TO_G_L, self.bilirubin * BILIRUBIN_MG_DL_TO_UMOL_L)
            }
        }
    }

    pub fn score(&self) -> CalcResult<f64> {
        let (albumin, bilirubin) = self.in_si_units();
        Ok(checked_log10(bilirubin, "bilirubin")? * BILIRUBIN_COEFFICIENT
            + albumin * ALBUMIN_COEFFICIENT)
    }
}

pub fn grade(score: f64) -> (i64, &'static str) {
    if score <= GRADE_1_MAX {
        (1, "Best liver function - well-compensated")
    } else if score <= GRADE_2_MAX {
        (2, "Intermediate liver function - moderately compensated")
    } else {
        (3, "Worst liver function - poorly compensated")
    }
}

pub struct Albi;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "albi",
    title: "ALBI Grade",
    params: &[
        ParamSpec::required("unit_system", ParamKind::category::<UnitSystem>()),
        ParamSpec::required("albumin", ParamKind::Float),
        ParamSpec::required("bilirubin", ParamKind::Float),
    ],
};

impl CalculatorPlugin for Albi {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let score = AlbiInput::from_input(input)?.score()?;
        let (grade, interpretation) = grade(score);

        Ok(RawOutput::new()
            .float("albi_score", score, 3)
            .integer("albi_grade", grade)
            .text("interpretation", interpretation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryPolicy;
    use crate::formatter::format;
    use crate::normalizer::normalize;
    use radcalc_types::{EvaluationResult, FieldValue};

    fn run(args: &[&str]) -> EvaluationResult {
        let input = normalize(&SPEC, args, CategoryPolicy::Lenient).unwrap();
        format(Albi.evaluate(&input).unwrap()).unwrap()
    }

    #[test]
    fn si_units_grade_one() {
        let result = run(&["SI", "40", "15"]);
        assert_eq!(result.get("albi_score"), Some(&FieldValue::Float(-2.632)));
        assert_eq!(result.get("albi_grade"), Some(&FieldValue::Integer(1)));
        assert_eq!(
            result.get("interpretation"),
            Some(&FieldValue::from("Best liver function - well-compensated"))
        );
    }

    #[test]
    fn us_units_are_converted_before_scoring() {
        let result = run(&["us", "3.5", "1.0"]);
        assert_eq!(result.get("albi_score"), Some(&FieldValue::Float(-2.168)));
        assert_eq!(result.get("albi_grade"), Some(&FieldValue::Integer(2)));
    }

    #[test]
    fn unknown_unit_system_is_treated_as_si() {
        assert_eq!(run(&["metric", "40", "15"]), run(&["si", "40", "15"]));
    }

    #[test]
    fn grade_boundaries_are_inclusive() {
        assert_eq!(grade(-2.60).0, 1);
        assert_eq!(grade(-1.39).0, 2);
        assert_eq!(grade(-1.0).0, 3);
    }

    #[test]
    fn non_positive_bilirubin_is_a_computation_error() {
        let input = normalize(&SPEC, &["si", "40", "0"], CategoryPolicy::Lenient).unwrap();
        assert_eq!(Albi.evaluate(&input).unwrap_err().kind(), "computation_error");
    }
}
