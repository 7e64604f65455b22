//! Bosniak classification of cystic renal masses.

use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CystFeatures {
    pub homogeneous: bool,
    pub thin_wall: bool,
    pub no_septa_calcification_enhancement: bool,
    pub thickened_walls: bool,
    pub measurable_enhancement: bool,
}

impl CystFeatures {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            homogeneous: input.flag("homogeneous")?,
            thin_wall: input.flag("thin_wall")?,
            no_septa_calcification_enhancement: input
                .flag("no_septa_calcification_enhancement")?,
            thickened_walls: input.flag("thickened_walls")?,
            measurable_enhancement: input.flag("measurable_enhancement")?,
        })
    }

    /// (classification, interpretation); first matching rule wins.
    pub fn classify(&self) -> (&'static str, &'static str) {
        if self.homogeneous && self.thin_wall && self.no_septa_calcification_enhancement {
            ("Bosniak I", "Benign simple cyst, no follow-up needed")
        } else if self.thickened_walls && self.measurable_enhancement {
            ("Bosniak III", "Indeterminate cystic mass, surgical exploration recommended")
        } else {
            ("Bosniak II or IV", "Further classification needed")
        }
    }
}

pub struct RenalCyst;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "renal-cyst",
    title: "Bosniak Renal Cyst Classification",
    params: &[
        ParamSpec::required("homogeneous", ParamKind::Flag),
        ParamSpec::required("thin_wall", ParamKind::Flag),
        ParamSpec::required("no_septa_calcification_enhancement", ParamKind::Flag),
        ParamSpec::defaulted("thickened_walls", ParamKind::Flag, "no"),
        ParamSpec::defaulted("measurable_enhancement", ParamKind::Flag, "no"),
    ],
};

impl CalculatorPlugin for RenalCyst {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let (classification, interpretation) = CystFeatures::from_input(input)?.classify();

        Ok(RawOutput::new()
            .text("classification", classification)
            .text("interpretation", interpretation))
    }
}
