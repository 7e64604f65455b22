//! Adrenal mass characterization
//!
//! CT contrast washout and MRI chemical-shift signal loss. Each formula exists
//! in two versions: the current one (`adrenal-ct`, `adrenal-mri`) and the older
//! verifier (`-v1`), which reports washout at one decimal place and uses strict
//! thresholds. They stay separate calculators so neither one's output drifts.

use super::checked_div;
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const ABSOLUTE_WASHOUT_THRESHOLD: f64 = 60.0;
const RELATIVE_WASHOUT_THRESHOLD: f64 = 40.0;
const SIGNAL_INDEX_THRESHOLD: f64 = 16.5;

const WASHOUT_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("unenhanced", ParamKind::Float),
    ParamSpec::required("portal", ParamKind::Float),
    ParamSpec::required("delayed", ParamKind::Float),
];

const CHEMICAL_SHIFT_PARAMS: &[ParamSpec] = &[
    ParamSpec::required("in_phase", ParamKind::Float),
    ParamSpec::required("out_phase", ParamKind::Float),
];

/// Attenuation (HU) in the three CT phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WashoutInput {
    pub unenhanced: f64,
    pub portal: f64,
    pub delayed: f64,
}

impl WashoutInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            unenhanced: input.number("unenhanced")?,
            portal: input.number("portal")?,
            delayed: input.number("delayed")?,
        })
    }
}

/// Unrounded washout percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Washout {
    pub absolute: f64,
    pub relative: f64,
}

pub fn washout(input: &WashoutInput) -> CalcResult<Washout> {
    let drop = input.portal - input.delayed;
    let absolute =
        checked_div(drop, input.portal - input.unenhanced, "absolute washout")? * 100.0;
    let relative = checked_div(drop, input.portal, "relative washout")? * 100.0;
    Ok(Washout { absolute, relative })
}

/// In-phase and out-of-phase signal intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalShiftInput {
    pub in_phase: f64,
    pub out_phase: f64,
}

impl ChemicalShiftInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self { in_phase: input.number("in_phase")?, out_phase: input.number("out_phase")? })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalShift {
    pub signal_index: f64,
    pub ratio: f64,
}

pub fn chemical_shift(input: &ChemicalShiftInput) -> CalcResult<ChemicalShift> {
    let signal_index =
        checked_div(input.in_phase - input.out_phase, input.in_phase, "signal intensity index")?
            * 100.0;
    let ratio = checked_div(input.in_phase, input.out_phase, "chemical shift ratio")?;
    Ok(ChemicalShift { signal_index, ratio })
}

pub struct AdrenalCtWashout;

static CT_SPEC: CalculatorSpec =
    CalculatorSpec { id: "adrenal-ct", title: "Adrenal CT Washout", params: WASHOUT_PARAMS };

impl CalculatorPlugin for AdrenalCtWashout {
    fn spec(&self) -> &'static CalculatorSpec {
        &CT_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let result = washout(&WashoutInput::from_input(input)?)?;
        let adenoma = result.absolute >= ABSOLUTE_WASHOUT_THRESHOLD
            && result.relative >= RELATIVE_WASHOUT_THRESHOLD;

        Ok(RawOutput::new()
            .float("absolute_washout", result.absolute, 2)
            .float("relative_washout", result.relative, 2)
            .flag("suggests_adenoma", adenoma))
    }
}

pub struct AdrenalCtWashoutV1;

static CT_V1_SPEC: CalculatorSpec = CalculatorSpec {
    id: "adrenal-ct-v1",
    title: "Adrenal Washout CT (v1)",
    params: WASHOUT_PARAMS,
};

impl CalculatorPlugin for AdrenalCtWashoutV1 {
    fn spec(&self) -> &'static CalculatorSpec {
        &CT_V1_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let result = washout(&WashoutInput::from_input(input)?)?;
        let interpretation = if result.absolute > ABSOLUTE_WASHOUT_THRESHOLD
            && result.relative > RELATIVE_WASHOUT_THRESHOLD
        {
            "Suggests benign adenoma"
        } else {
            "Does not meet criteria for adenoma"
        };

        Ok(RawOutput::new()
            .float("absolute_washout", result.absolute, 1)
            .float("relative_washout", result.relative, 1)
            .text("interpretation", interpretation))
    }
}

pub struct AdrenalMriChemicalShift;

static MRI_SPEC: CalculatorSpec = CalculatorSpec {
    id: "adrenal-mri",
    title: "Adrenal MRI Chemical Shift",
    params: CHEMICAL_SHIFT_PARAMS,
};

impl CalculatorPlugin for AdrenalMriChemicalShift {
    fn spec(&self) -> &'static CalculatorSpec {
        &MRI_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let result = chemical_shift(&ChemicalShiftInput::from_input(input)?)?;

        Ok(RawOutput::new()
            .float("signal_intensity_index", result.signal_index, 2)
            .float("chemical_shift_ratio", result.ratio, 3)
            .flag("suggests_adenoma", result.signal_index > SIGNAL_INDEX_THRESHOLD))
    }
}

pub struct AdrenalMriChemicalShiftV1;

static MRI_V1_SPEC: CalculatorSpec = CalculatorSpec {
    id: "adrenal-mri-v1",
    title: "Adrenal MRI Chemical Shift (v1)",
    params: CHEMICAL_SHIFT_PARAMS,
};

impl CalculatorPlugin for AdrenalMriChemicalShiftV1 {
    fn spec(&self) -> &'static CalculatorSpec {
        &MRI_V1_SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let result = chemical_shift(&ChemicalShiftInput::from_input(input)?)?;
        let interpretation = if result.signal_index > SIGNAL_INDEX_THRESHOLD {
            "Consistent with lipid-rich adenoma"
        } else {
            "Does not meet criteria for lipid-rich adenoma"
        };

        Ok(RawOutput::new()
            .float("sii", result.signal_index, 2)
            .float("csr", result.ratio, 3)
            .text("interpretation", interpretation))
    }
}
