use proptest::prelude::*;
use radcalc_calculator::formatter::round_to;
use radcalc_calculator::{CalcError, Engine, FieldValue};

fn token(value: f64) -> String {
    value.to_string()
}

proptest! {
    #[test]
    fn rounding_is_idempotent(value in -1.0e6..1.0e6f64, precision in 0u32..4) {
        let once = round_to(value, precision);
        prop_assert_eq!(round_to(once, precision), once);
    }

    #[test]
    fn identical_input_gives_identical_output(
        unenhanced in -50.0..80.0f64,
        portal in 60.0..200.0f64,
        delayed in 20.0..150.0f64,
    ) {
        let engine = Engine::new();
        let args = [token(unenhanced), token(portal), token(delayed)];
        prop_assert_eq!(engine.evaluate("adrenal-ct", &args), engine.evaluate("adrenal-ct", &args));
    }

    #[test]
    fn reported_floats_carry_no_extra_precision(
        length in 0.5..10.0f64,
        height in 0.5..10.0f64,
        width in 0.5..10.0f64,
        psa in 0.1..50.0f64,
    ) {
        let args = [token(length), token(height), token(width), token(psa)];
        let result = Engine::new().evaluate("prostate", &args).unwrap();
        for (name, value) in result.iter() {
            if let FieldValue::Float(value) = value {
                prop_assert_eq!(round_to(*value, 3), *value, "{} is not rounded", name);
            }
        }
    }

    #[test]
    fn short_argument_lists_always_fail_with_missing_argument(
        calculator_index in 0usize..17,
        fill in "[a-z0-9.]{0,6}",
    ) {
        let engine = Engine::new();
        let plugin = engine.registry().plugins().nth(calculator_index).unwrap();
        let min_arity = plugin.spec().min_arity();
        for supplied in 0..min_arity {
            let args = vec![fill.clone(); supplied];
            let err = engine.evaluate(plugin.name(), &args).unwrap_err();
            let is_missing_argument = matches!(err, CalcError::MissingArgument { .. });
            prop_assert!(is_missing_argument, "{}", err);
        }
    }

    #[test]
    fn identifiers_resolve_in_any_case(calculator_index in 0usize..17, upper in any::<bool>()) {
        let engine = Engine::new();
        let id = engine.registry().identifiers()[calculator_index];
        let query = if upper { id.to_ascii_uppercase() } else { id.to_string() };
        prop_assert_eq!(engine.registry().resolve(&query).unwrap().name(), id);
    }
}
