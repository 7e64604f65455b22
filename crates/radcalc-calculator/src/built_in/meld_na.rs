//! MELD-Na score
//!
//! The base MELD is rounded and clamped before the sodium correction is
//! applied, and the corrected score is rounded and clamped again. Rounding is
//! half to even at both steps.

use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const LAB_FLOOR: f64 = 1.0;
const CREATININE_CAP: f64 = 4.0;
const SODIUM_MIN: f64 = 125.0;
const SODIUM_MAX: f64 = 137.0;
const SCORE_MIN: f64 = 6.0;
const SCORE_MAX: f64 = 40.0;
/// The sodium correction only applies above this base score.
const SODIUM_CORRECTION_THRESHOLD: i64 = 11;

/// Creatinine and bilirubin in mg/dL, sodium in mEq/L.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeldInput {
    pub creatinine: f64,
    pub bilirubin: f64,
    pub inr: f64,
    pub sodium: f64,
    pub dialysis: bool,
}

impl MeldInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            creatinine: input.number("creatinine")?,
            bilirubin: input.number("bilirubin")?,
            inr: input.number("inr")?,
            sodium: input.number("sodium")?,
            dialysis: input.flag("dialysis")?,
        })
    }

    fn adjusted_creatinine(&self) -> f64 {
        if self.dialysis { CREATININE_CAP } else { self.creatinine.clamp(LAB_FLOOR, CREATININE_CAP) }
    }

    pub fn meld(&self) -> i64 {
        let raw = (0.957 * self.adjusted_creatinine().ln()
            + 0.378 * self.bilirubin.max(LAB_FLOOR).ln()
            + 1.12 * self.inr.max(LAB_FLOOR).ln()
            + 0.643)
            * 10.0;
        clamp_score(raw)
    }

    pub fn meld_na(&self, meld: i64) -> i64 {
        if meld <= SODIUM_CORRECTION_THRESHOLD {
            return meld;
        }
        let deficit = SODIUM_MAX - self.sodium.clamp(SODIUM_MIN, SODIUM_MAX);
        let meld = meld as f64;
        clamp_score(meld + 1.32 * deficit - 0.033 * meld * deficit)
    }
}

fn clamp_score(raw: f64) -> i64 {
    raw.round_ties_even().clamp(SCORE_MIN, SCORE_MAX) as i64
}

/// (3-month mortality, risk category)
pub fn risk_band(score: i64) -> (&'static str, &'static str) {
    match score {
        i64::MIN..=9 => ("1.9%", "Low risk"),
        10..=19 => ("6.0%", "Moderate risk"),
        20..=29 => ("19.6%", "High risk"),
        30..=39 => ("52.6%", "Very high risk"),
        _ => (">70%", "Critical risk"),
    }
}

pub struct MeldNa;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "meld-na",
    title: "MELD-Na Score",
    params: &[
        ParamSpec::required("creatinine", ParamKind::Float),
        ParamSpec::required("bilirubin", ParamKind::Float),
        ParamSpec::required("inr", ParamKind::Float),
        ParamSpec::required("sodium", ParamKind::Float),
        ParamSpec::required("dialysis", ParamKind::Flag),
    ],
};

impl CalculatorPlugin for MeldNa {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let labs = MeldInput::from_input(input)?;
        let meld = labs.meld();
        let meld_na = labs.meld_na(meld);
        let (mortality, risk) = risk_band(meld_na);

        Ok(RawOutput::new()
            .integer("meld_score", meld)
            .integer("meld_na_score", meld_na)
            .text("mortality_3mo", mortality)
            .text("risk_category", risk))
    }
}
