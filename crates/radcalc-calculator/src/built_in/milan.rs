//! Milan and UCSF criteria for HCC transplant eligibility.

use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

const MILAN_SINGLE_MAX_CM: f64 = 5.0;
const MILAN_MULTIPLE_MAX_CM: f64 = 3.0;
const UCSF_SINGLE_MAX_CM: f64 = 6.5;
const UCSF_LARGEST_MAX_CM: f64 = 4.5;
const UCSF_TOTAL_MAX_CM: f64 = 8.0;
const MAX_TUMOR_COUNT: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Within,
    Exceeds,
    Excluded,
}

impl Eligibility {
    fn within(condition: bool) -> Self {
        if condition { Eligibility::Within } else { Eligibility::Exceeds }
    }

    pub fn label(self) -> &'static str {
        match self {
            Eligibility::Within => "WITHIN",
            Eligibility::Exceeds => "EXCEEDS",
            Eligibility::Excluded => "EXCLUDED",
        }
    }
}

/// Tumor sizes in cm. `additional` holds tumors 2 and 3 when supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct MilanInput {
    pub tumor_count: i64,
    pub primary: f64,
    pub additional: Vec<f64>,
    pub macrovascular_invasion: bool,
    pub extrahepatic_disease: bool,
}

impl MilanInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        let mut additional = Vec::with_capacity(2);
        additional.extend(input.optional_number("tumor2_size")?);
        additional.extend(input.optional_number("tumor3_size")?);

        Ok(Self {
            tumor_count: input.integer("tumor_count")?,
            primary: input.number("tumor1_size")?,
            additional,
            macrovascular_invasion: input.flag("macrovascular")?,
            extrahepatic_disease: input.flag("extrahepatic")?,
        })
    }

    fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.primary).chain(self.additional.iter().copied())
    }

    fn largest(&self) -> f64 {
        self.sizes().fold(f64::NEG_INFINITY, f64::max)
    }

    fn total_diameter(&self) -> f64 {
        self.sizes().sum()
    }
}

pub struct MilanCriteria;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "milan",
    title: "Milan Criteria",
    params: &[
        ParamSpec::required("tumor_count", ParamKind::Integer),
        ParamSpec::required("tumor1_size", ParamKind::Float),
        ParamSpec::defaulted("macrovascular", ParamKind::Flag, "no"),
        ParamSpec::defaulted("extrahepatic", ParamKind::Flag, "no"),
        ParamSpec::optional("tumor2_size", ParamKind::Float),
        ParamSpec::optional("tumor3_size", ParamKind::Float),
    ],
};

impl CalculatorPlugin for MilanCriteria {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let hcc = MilanInput::from_input(input)?;

        if hcc.macrovascular_invasion || hcc.extrahepatic_disease {
            return Ok(excluded(
                Eligibility::Excluded,
                "Macrovascular invasion or extrahepatic disease present",
            ));
        }
        if hcc.tumor_count > MAX_TUMOR_COUNT {
            return Ok(excluded(Eligibility::Exceeds, "More than 3 tumors"));
        }

        // A single tumor is judged on tumor 1 alone; extra sizes are ignored.
        if hcc.tumor_count == 1 {
            let size = hcc.primary;
            return Ok(RawOutput::new()
                .text("milan_criteria", Eligibility::within(size <= MILAN_SINGLE_MAX_CM).label())
                .text("ucsf_criteria", Eligibility::within(size <= UCSF_SINGLE_MAX_CM).label())
                .integer("tumor_count", 1)
                .float("largest_tumor", size, 2));
        }

        let largest = hcc.largest();
        let total = hcc.total_diameter();
        let milan = hcc.sizes().all(|size| size <= MILAN_MULTIPLE_MAX_CM);
        let ucsf = largest <= UCSF_LARGEST_MAX_CM && total <= UCSF_TOTAL_MAX_CM;

        Ok(RawOutput::new()
            .text("milan_criteria", Eligibility::within(milan).label())
            .text("ucsf_criteria", Eligibility::within(ucsf).label())
            .integer("tumor_count", hcc.tumor_count)
            .float("largest_tumor", largest, 2)
            .float("total_diameter", total, 2))
    }
}

fn excluded(status: Eligibility, reason: &'static str) -> RawOutput {
    RawOutput::new()
        .text("milan_criteria", status.label())
        .text("ucsf_criteria", status.label())
        .text("reason", reason)
}
