//! Built-in calculators provided by the radcalc engine.

use crate::error::{CalcError, CalcResult};
use crate::plugin::CalculatorPlugin;

// Adrenal & prostate imaging
pub mod adrenal;
pub mod prostate;

// Hepatology
pub mod albi;
pub mod child_pugh;
pub mod meld_na;
pub mod milan;
pub mod y90;

// Questionnaires
pub mod symptom_scores;

// Renal
pub mod bosniak;
pub mod renal_nephrometry;

// Size & developmental screens
pub mod hip_dysplasia;
pub mod spleen;

/// Every built-in calculator, in registration order.
pub fn all() -> Vec<Box<dyn CalculatorPlugin>> {
    vec![
        Box::new(adrenal::AdrenalCtWashout),
        Box::new(adrenal::AdrenalMriChemicalShift),
        Box::new(prostate::ProstateVolume),
        Box::new(albi::Albi),
        Box::new(child_pugh::ChildPugh),
        Box::new(meld_na::MeldNa),
        Box::new(symptom_scores::Ipss),
        Box::new(symptom_scores::Shim),
        Box::new(renal_nephrometry::RenalNephrometry),
        Box::new(milan::MilanCriteria),
        Box::new(y90::Y90Dosimetry),
        Box::new(adrenal::AdrenalCtWashoutV1),
        Box::new(adrenal::AdrenalMriChemicalShiftV1),
        Box::new(prostate::ProstateVolumeV1),
        Box::new(bosniak::RenalCyst),
        Box::new(spleen::SpleenSize),
        Box::new(hip_dysplasia::HipDysplasia),
    ]
}

pub(crate) fn checked_div(numerator: f64, denominator: f64, quantity: &str) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::computation(format!("division by zero computing {quantity}")));
    }
    Ok(numerator / denominator)
}

pub(crate) fn checked_log10(value: f64, quantity: &str) -> CalcResult<f64> {
    if value <= 0.0 {
        return Err(CalcError::computation(format!(
            "logarithm of non-positive {quantity} ({value})"
        )));
    }
    Ok(value.log10())
}
