//! Child-Pugh score for chronic liver disease.

use crate::category::{Category, CategoryTable};
use crate::error::CalcResult;
use crate::formatter::RawOutput;
use crate::normalizer::NormalizedInput;
use crate::plugin::{CalculatorPlugin, CalculatorSpec, ParamKind, ParamSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ascites {
    None,
    Slight,
    Moderate,
}

impl Category for Ascites {
    const TABLE: &'static CategoryTable = &CategoryTable {
        name: "ascites",
        tags: &["none", "slight", "moderate"],
        fallback: Some("none"),
    };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Ascites::None),
            "slight" => Some(Ascites::Slight),
            "moderate" => Some(Ascites::Moderate),
            _ => None,
        }
    }
}

impl Ascites {
    pub fn points(self) -> i64 {
        match self {
            Ascites::None => 1,
            Ascites::Slight => 2,
            Ascites::Moderate => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encephalopathy {
    None,
    Grade1To2,
    Grade3To4,
}

impl Category for Encephalopathy {
    const TABLE: &'static CategoryTable = &CategoryTable {
        name: "encephalopathy",
        tags: &["none", "grade1-2", "grade3-4"],
        fallback: Some("none"),
    };

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Encephalopathy::None),
            "grade1-2" => Some(Encephalopathy::Grade1To2),
            "grade3-4" => Some(Encephalopathy::Grade3To4),
            _ => None,
        }
    }
}

impl Encephalopathy {
    pub fn points(self) -> i64 {
        match self {
            Encephalopathy::None => 1,
            Encephalopathy::Grade1To2 => 2,
            Encephalopathy::Grade3To4 => 3,
        }
    }
}

/// Bilirubin in mg/dL, albumin in g/dL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildPughInput {
    pub bilirubin: f64,
    pub albumin: f64,
    pub inr: f64,
    pub ascites: Ascites,
    pub encephalopathy: Encephalopathy,
}

impl ChildPughInput {
    fn from_input(input: &NormalizedInput) -> CalcResult<Self> {
        Ok(Self {
            bilirubin: input.number("bilirubin")?,
            albumin: input.number("albumin")?,
            inr: input.number("inr")?,
            ascites: input.category("ascites")?,
            encephalopathy: input.category("encephalopathy")?,
        })
    }

    pub fn total_score(&self) -> i64 {
        bilirubin_points(self.bilirubin)
            + albumin_points(self.albumin)
            + inr_points(self.inr)
            + self.ascites.points()
            + self.encephalopathy.points()
    }
}

fn bilirubin_points(bilirubin: f64) -> i64 {
    if bilirubin < 2.0 {
        1
    } else if bilirubin <= 3.0 {
        2
    } else {
        3
    }
}

fn albumin_points(albumin: f64) -> i64 {
    if albumin > 3.5 {
        1
    } else if albumin >= 2.8 {
        2
    } else {
        3
    }
}

fn inr_points(inr: f64) -> i64 {
    if inr < 1.7 {
        1
    } else if inr <= 2.2 {
        2
    } else {
        3
    }
}

/// (class, one-year mortality)
pub fn classify(total_score: i64) -> (&'static str, &'static str) {
    match total_score {
        i64::MIN..=6 => ("A", "5-10%"),
        7..=9 => ("B", "15-20%"),
        _ => ("C", "45-55%"),
    }
}

pub struct ChildPugh;

static SPEC: CalculatorSpec = CalculatorSpec {
    id: "child-pugh",
    title: "Child-Pugh Score",
    params: &[
        ParamSpec::required("bilirubin", ParamKind::Float),
        ParamSpec::required("albumin", ParamKind::Float),
        ParamSpec::required("inr", ParamKind::Float),
        ParamSpec::required("ascites", ParamKind::category::<Ascites>()),
        ParamSpec::required("encephalopathy", ParamKind::category::<Encephalopathy>()),
    ],
};

impl CalculatorPlugin for ChildPugh {
    fn spec(&self) -> &'static CalculatorSpec {
        &SPEC
    }

    fn evaluate(&self, input: &NormalizedInput) -> CalcResult<RawOutput> {
        let total = ChildPughInput::from_input(input)?.total_score();
        let (class, mortality) = classify(total);

        Ok(RawOutput::new()
            .integer("total_score", total)
            .text("child_pugh_class", class)
            .text("mortality_1yr", mortality))
    }
}
