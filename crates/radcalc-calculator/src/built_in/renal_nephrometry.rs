//! R.E.N.A.L. nephrometry score for renal mass complexity.

use crate::category::{Category, CategoryTable};
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

/// Fraction of the tumor lying outside the renal contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exophytic {
    AtLeastHalf,
    LessThanHalf,
    Endophytic,
}

impl Category for Exophytic {
    const TABLE: &'static CategoryTable = &CategoryTable {
        name: "exophytic",
        tags: &[">=50", "<50", "endophytic"],
        fallback: Some("<50"),
    };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            ">=50" => Some(Exophytic::AtLeastHalf),
            "<50" => Some(Exophytic::LessThanHalf),
            "endophytic" => Some(Exophytic::Endophytic),
            _ => None,
        }
    }
}

impl Exophytic {
    pub fn points(self) -> i64 {
        match self {
            Exophytic::AtLeastHalf => 1,
            Exophytic::LessThanHalf => 2,
            Exophytic::Endophytic => 3,
        }
    }
}

/// Distance to the collecting system or sinus, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nearness {
    AtLeastSeven,
    FourToSeven,
    AtMostFour,
}

impl Category for Nearness {
    const TABLE: &'static CategoryTable = &CategoryTable {
        name: "nearness",
        tags: &[">=7", "4-7", "<=4"],
        fallback: Some(">=7"),
    };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            ">=7" => Some(Nearness::AtLeastSeven),
            "4-7" => Some(Nearness::FourToSeven),
            "<=4" => Some(Nearness::AtMostFour),
            _ => None,
        }
    }
}

impl Nearness {
    pub fn points(self) -> i64 {
        match self {
            Nearness::AtLeastSeven => 1,
            Nearness::FourToSeven => 2,
            Nearness::AtMostFour => 3,
        }
    }
}

/// Position relative to the polar lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarLocation {
    AboveOrBelow,
    Crosses,
    Central,
}

impl Category for PolarLocation {
    const TABLE: &'static CategoryTable = &CategoryTable {
        name: "location",
        tags: &["above/below", "crosses", "central"],
        fallback: Some("above/below"),
    };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "above/below" => Some(PolarLocation::AboveOrBelow),
            "crosses" => Some(PolarLocation::Crosses),
            "central" => Some(PolarLocation::Central),
            _ => None,
        }
    }
}

impl PolarLocation {
    pub fn points(self) -> i64 {
        match self {
            PolarLocation::AboveOrBelow => 1,
            PolarLocation::Crosses => 2,
            PolarLocation::Central => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NephrometryInput {
    /// Maximal diameter in cm
    pub radius: f64,
    pub exophytic: Exophytic,
    pub nearness: Nearness,
    pub location: PolarLocation,
    pub hilar: bool,
}

impl NephrometryInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            radius: input.number("radius")?,
            exophytic: input.category("exophytic")?,
            nearness: input.category("nearness")?,
            location: input.category("location")?,
            hilar: input.flag("hilar")?,
        })
    }
}

fn radius_points(radius: f64) -> i64 {
    if radius <= 4.0 {
        1
    } else if radius < 7.0 {
        2
    } else {
        3
    }
}

pub fn complexity(total: i64) -> &'static str {
    match total {
        i64::MIN..=6 => "Low",
        7..=9 => "Moderate",
        _ => "High",
    }
}

pub struct RenalNephrometry;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "renal-nephrometry",
    title: "R.E.N.A.L. Nephrometry Score",
    params: &[
        ParamSpec::required("radius", ParamKind::Float),
        ParamSpec::required("exophytic", ParamKind::category::<Exophytic>()),
        ParamSpec::required("nearness", ParamKind::category::<Nearness>()),
        ParamSpec::required("location", ParamKind::category::<PolarLocation>()),
        ParamSpec::defaulted("hilar", ParamKind::Flag, "no"),
    ],
};

impl CalculatorPlugin for RenalNephrometry {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let mass = NephrometryInput::from_input(input)?;
        let r = radius_points(mass.radius);
        let e = mass.exophytic.points();
        let n = mass.nearness.points();
        let l = mass.location.points();
        let total = r + e + n + l;

        Ok(RawOutput::new()
            .integer("renal_score", total)
            .text("complexity", complexity(total))
            .flag("hilar", mass.hilar)
            .text("breakdown", format!("R={r} E={e} N={n} L={l}")))
    }
}
