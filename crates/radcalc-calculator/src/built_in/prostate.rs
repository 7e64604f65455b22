//! Prostate ellipsoid volume and PSA density.

use super::checked_div;
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const ELLIPSOID_FACTOR: f64 = 0.52;
const PSA_DENSITY_THRESHOLD: f64 = 0.15;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::required("length", ParamKind::Float),
    ParamSpec::required("height", ParamKind::Float),
    ParamSpec::required("width", ParamKind::Float),
    ParamSpec::required("psa", ParamKind::Float),
];

/// Gland dimensions in cm and serum PSA in ng/mL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProstateInput {
    pub length: f64,
    pub height: f64,
    pub width: f64,
    pub psa: f64,
}

impl ProstateInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            length: input.number("length")?,
            height: input.number("height")?,
            width: input.number("width")?,
            psa: input.number("psa")?,
        })
    }

    pub fn volume(&self) -> f64 {
        self.length * self.height * self.width * ELLIPSOID_FACTOR
    }

    pub fn psa_density(&self) -> CalcResult<f64> {
        checked_div(self.psa, self.volume(), "PSA density")
    }
}

pub struct ProstateVolume;

static SPEC: CalculatorSpec =
    CalculatorSpec { id: "prostate", title: "Prostate Volume & PSA Density", params: PARAMS };

impl CalculatorPlugin for ProstateVolume {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let prostate = ProstateInput::from_input(input)?;
        let density = prostate.psa_density()?;
        let interpretation = if density >= PSA_DENSITY_THRESHOLD { "Elevated" } else { "Normal" };

        Ok(RawOutput::new()
            .float("volume_cm3", prostate.volume(), 2)
            .float("psa_density", density, 3)
            .text("interpretation", interpretation))
    }
}

pub struct ProstateVolumeV1;

static V1_SPEC: CalculatorSpec =
    CalculatorSpec { id: "prostate-v1", title: "Prostate Volume (v1)", params: PARAMS };

impl CalculatorPlugin for ProstateVolumeV1 {
    fn spec(&self) -> &'static CalculatorSpec {
        &V1_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let prostate = ProstateInput::from_input(input)?;
        let density = prostate.psa_density()?;
        let interpretation = if density < PSA_DENSITY_THRESHOLD {
            "Normal PSA density"
        } else {
            "Elevated PSA density"
        };

        Ok(RawOutput::new()
            .float("volume", prostate.volume(), 2)
            .float("psa_density", density, 3)
            .text("interpretation", interpretation))
    }
}
