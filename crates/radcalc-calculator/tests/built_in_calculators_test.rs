use radcalc_calculator::{CalcError, Engine, FieldValue};
use serde_json::json;

fn field(result: &radcalc_calculator::EvaluationResult, name: &str) -> FieldValue {
    result.get(name).cloned().unwrap_or_else(|| panic!("missing field {name}"))
}

#[test]
fn washout_scenario() {
    let result = Engine::new().evaluate("adrenal-ct", &["10", "100", "40"]).unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "absolute_washout": 66.67, "relative_washout": 60.0, "suggests_adenoma": true })
    );
}

#[test]
fn prostate_volume_scenario() {
    let result = Engine::new().evaluate("prostate", &["4", "3", "3.5", "2"]).unwrap();
    assert_eq!(field(&result, "volume_cm3"), FieldValue::Float(21.84));
    assert_eq!(field(&result, "psa_density"), FieldValue::Float(0.092));
    assert_eq!(field(&result, "interpretation"), FieldValue::from("Normal"));
}

#[test]
fn albi_scenario() {
    let result = Engine::new().evaluate("albi", &["SI", "40", "15"]).unwrap();
    assert_eq!(field(&result, "albi_score"), FieldValue::Float(-2.632));
    assert_eq!(field(&result, "albi_grade"), FieldValue::Integer(1));
    assert_eq!(
        field(&result, "interpretation"),
        FieldValue::from("Best liver function - well-compensated")
    );
}

#[test]
fn child_pugh_scenario() {
    let result =
        Engine::new().evaluate("child-pugh", &["1.5", "3.8", "1.2", "none", "none"]).unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"total_score":5,"child_pugh_class":"A","mortality_1yr":"5-10%"}"#
    );
}

#[test]
fn milan_single_tumor_scenario() {
    let result = Engine::new().evaluate("milan", &["1", "4", "no", "no"]).unwrap();
    assert_eq!(field(&result, "milan_criteria"), FieldValue::from("WITHIN"));
    assert_eq!(field(&result, "ucsf_criteria"), FieldValue::from("WITHIN"));
    assert_eq!(field(&result, "largest_tumor"), FieldValue::Float(4.0));
    assert_eq!(serde_json::to_value(&result).unwrap()["largest_tumor"], json!(4.0));
}

#[test]
fn unknown_calculator_scenario() {
    let engine = Engine::new();
    let err = engine.evaluate("tirads", &["1"]).unwrap_err();
    let CalcError::UnknownCalculator { available, .. } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(available.len(), 17);

    let doc = engine.run("tirads", &["1"]).unwrap_err();
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["error"], json!("Unknown calculator: tirads"));
    assert_eq!(value["kind"], json!("unknown_calculator"));
    assert_eq!(
        value["available"],
        json!([
            "adrenal-ct",
            "adrenal-mri",
            "prostate",
            "albi",
            "child-pugh",
            "meld-na",
            "ipss",
            "shim",
            "renal-nephrometry",
            "milan",
            "y90",
            "adrenal-ct-v1",
            "adrenal-mri-v1",
            "prostate-v1",
            "renal-cyst",
            "spleen-size",
            "hip-dysplasia"
        ])
    );
}

#[test]
fn error_documents_omit_available_for_other_failures() {
    let doc = Engine::new().run("shim", &["5", "5"]).unwrap_err();
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["kind"], json!("missing_argument"));
    assert!(value.get("available").is_none());
    assert_eq!(
        value["error"],
        json!(
            "shim requires at least 5 argument(s) but 2 were supplied (usage: shim q1 q2 q3 q4 q5)"
        )
    );
}

#[test]
fn every_calculator_evaluates_a_representative_case() {
    let cases: &[(&str, &[&str])] = &[
        ("adrenal-ct", &["10", "100", "40"]),
        ("adrenal-mri", &["400", "300"]),
        ("prostate", &["4", "3", "3.5", "2"]),
        ("albi", &["us", "3.5", "1.0"]),
        ("child-pugh", &["2.5", "3.0", "1.8", "slight", "grade1-2"]),
        ("meld-na", &["2", "3", "1.5", "130", "no"]),
        ("ipss", &["1", "2", "3", "1", "2", "3", "1", "3"]),
        ("shim", &["3", "3", "3", "3", "3"]),
        ("renal-nephrometry", &["5", "<50", "4-7", "crosses", "yes"]),
        ("milan", &["2", "2.5", "no", "no", "3"]),
        ("y90", &["partition", "200", "120", "10", "50", "3"]),
        ("adrenal-ct-v1", &["10", "100", "40"]),
        ("adrenal-mri-v1", &["400", "300"]),
        ("prostate-v1", &["4", "3", "3.5", "2"]),
        ("renal-cyst", &["yes", "yes", "yes"]),
        ("spleen-size", &["14", "45", "female"]),
        ("hip-dysplasia", &["65", "50", "60"]),
    ];

    let engine = Engine::new();
    assert_eq!(cases.len(), engine.registry().len());
    for &(calculator, args) in cases {
        let result = engine
            .evaluate(calculator, args)
            .unwrap_or_else(|err| panic!("{calculator} failed: {err}"));
        assert!(!result.is_empty(), "{calculator} produced no fields");
    }
}

#[test]
fn negative_and_signed_numbers_parse() {
    let result = Engine::new().evaluate("adrenal-ct", &["-10", "+100", "40"]).unwrap();
    // (100 - 40) / (100 - -10) * 100
    assert_eq!(field(&result, "absolute_washout"), FieldValue::Float(54.55));
    assert_eq!(field(&result, "suggests_adenoma"), FieldValue::Boolean(false));
}

#[test]
fn duplicated_calculators_keep_their_own_precision() {
    let engine = Engine::new();
    let current = engine.evaluate("adrenal-ct", &["10", "100", "40"]).unwrap();
    let legacy = engine.evaluate("adrenal-ct-v1", &["10", "100", "40"]).unwrap();
    assert_eq!(field(&current, "absolute_washout"), FieldValue::Float(66.67));
    assert_eq!(field(&legacy, "absolute_washout"), FieldValue::Float(66.7));
}

#[test]
fn huge_measurements_are_reported_not_nulled() {
    let result = Engine::new().evaluate("hip-dysplasia", &["1e307", "50", "60"]).unwrap();
    assert_eq!(field(&result, "alpha_angle"), FieldValue::Float(1e307));

    let doc = serde_json::to_value(&result).unwrap();
    assert!(doc["alpha_angle"].is_f64());
}

#[test]
fn milan_single_tumor_ignores_stray_second_size() {
    let result = Engine::new().evaluate("milan", &["1", "4", "no", "no", "6"]).unwrap();
    assert_eq!(field(&result, "milan_criteria"), FieldValue::from("WITHIN"));
    assert_eq!(field(&result, "largest_tumor"), FieldValue::Float(4.0));
}
