//! Y-90 radiation segmentectomy dosimetry.
//!
//! Both models prescribe activity from the segment's mass at unit tissue
//! density, reduced by the lung shunt fraction. The partition model also needs
//! the tumor volume and tumor-to-normal uptake ratio.

use crate::category::{Category, CategoryTable};
use crate::error::{CalcError, CalcResult};
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

/// Absorbed dose (Gy·kg) delivered per GBq of Y-90.
const GY_KG_PER_GBQ: f64 = 49.67;
const LUNG_MASS_KG: f64 = 1.0;
const LUNG_DOSE_LIMIT_GY: f64 = 30.0;
const ML_PER_KG: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DosimetryModel {
    Mird,
    Partition,
}

impl Category for DosimetryModel {
    const TABLE: &'static CategoryTable =
        &CategoryTable { name: "model", tags: &["mird", "partition"], fallback: None };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "mird" => Some(DosimetryModel::Mird),
            "partition" => Some(DosimetryModel::Partition),
            _ => None,
        }
    }
}

impl DosimetryModel {
    pub fn label(self) -> &'static str {
        match self {
            DosimetryModel::Mird => "MIRD",
            DosimetryModel::Partition => "Partition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionInput {
    /// mL
    pub tumor_volume: f64,
    pub tn_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Y90Input {
    pub model: DosimetryModel,
    /// mL
    pub segment_volume: f64,
    /// Gy
    pub target_dose: f64,
    /// Percent of injected activity shunted to the lungs
    pub lung_shunt: f64,
    pub partition: Option<PartitionInput>,
}

impl Y90Input {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        let model = input.category("model")?;
        let tumor_volume = input.optional_number("tumor_volume")?;
        let tn_ratio = input.optional_number("tn_ratio")?;

        let partition = match (tumor_volume, tn_ratio) {
            (Some(tumor_volume), Some(tn_ratio)) => Some(PartitionInput { tumor_volume, tn_ratio }),
            _ if model == DosimetryModel::Partition => {
                return Err(CalcError::MissingArgument {
                    calculator: format!("{} (partition model)", SPEC.id),
                    expected: SPEC.params.len(),
                    received: input.len(),
                    usage: SPEC.usage(),
                });
            }
            _ => None,
        };

        Ok(Self {
            model,
            segment_volume: input.number("segment_volume")?,
            target_dose: input.number("target_dose")?,
            lung_shunt: input.number("lung_shunt")?,
            partition,
        })
    }

    fn shunt_fraction(&self) -> f64 {
        self.lung_shunt / 100.0
    }

    /// GBq
    pub fn prescribed_activity(&self) -> f64 {
        let segment_mass = self.segment_volume / ML_PER_KG;
        self.target_dose * segment_mass * (1.0 - self.shunt_fraction()) / GY_KG_PER_GBQ
    }

    /// Gy
    pub fn lung_dose(&self, activity: f64) -> f64 {
        GY_KG_PER_GBQ * activity * self.shunt_fraction() / LUNG_MASS_KG
    }
}

pub struct Y90Dosimetry;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "y90",
    title: "Y-90 Radiation Segmentectomy",
    params: &[
        ParamSpec::required("model", ParamKind::category::<DosimetryModel>()),
        ParamSpec::required("segment_volume", ParamKind::Float),
        ParamSpec::required("target_dose", ParamKind::Float),
        ParamSpec::required("lung_shunt", ParamKind::Float),
        ParamSpec::optional("tumor_volume", ParamKind::Float),
        ParamSpec::optional("tn_ratio", ParamKind::Float),
    ],
};

impl CalculatorPlugin for Y90Dosimetry {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let plan = Y90Input::from_input(input)?;
        let activity = plan.prescribed_activity();
        let lung_dose = plan.lung_dose(activity);

        let output = RawOutput::new().float("prescribed_activity_gbq", activity, 2);
        let output = match plan.model {
            DosimetryModel::Mird => output,
            DosimetryModel::Partition => output.float("tumor_dose_gy", plan.target_dose, 2),
        };

        Ok(output
            .float("lung_dose_gy", lung_dose, 2)
            .text("model", plan.model.label())
            .flag("safe", lung_dose < LUNG_DOSE_LIMIT_GY))
    }
}
