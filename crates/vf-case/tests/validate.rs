use vf_case::schema::*;
use vf_case::{ValidationError, reference_case, validate_case};

#[test]
fn reference_case_is_valid() {
    validate_case(&reference_case()).unwrap();
}

#[test]
fn rejects_single_component() {
    let mut case = reference_case();
    case.components.truncate(1);
    case.feed.composition = vec![1.0];
    let err = validate_case(&case).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "components"));
}

#[test]
fn rejects_duplicate_components() {
    let mut case = reference_case();
    case.components[1] = ComponentDef::Preset {
        name: "Benzene".to_string(),
    };
    let err = validate_case(&case).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn rejects_unknown_preset() {
    let mut case = reference_case();
    case.components[1] = ComponentDef::Preset {
        name: "unobtainium".to_string(),
    };
    let err = validate_case(&case).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownPreset { .. }));
}

#[test]
fn rejects_unsupported_version() {
    let mut case = reference_case();
    case.version = 99;
    let err = validate_case(&case).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnsupportedVersion { version: 99 }
    ));
}

#[test]
fn rejects_bad_feed() {
    let mut case = reference_case();
    case.feed.pressure_bar = 0.0;
    assert!(validate_case(&case).is_err());

    let mut case = reference_case();
    case.feed.composition = vec![0.75, 0.20];
    let err = validate_case(&case).unwrap_err();
    assert!(
        matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "feed.composition")
    );

    let mut case = reference_case();
    case.feed.composition = vec![0.75, 0.25, 0.0];
    assert!(validate_case(&case).is_err());
}

#[test]
fn rejects_zero_in_initial_guess() {
    let mut case = reference_case();
    case.initial_guess = Some(InitialGuessDef {
        x: vec![1.0, 0.0],
        y: vec![0.2, 0.8],
    });
    assert!(validate_case(&case).is_err());
}

#[test]
fn rejects_asymmetric_kij() {
    let mut case = reference_case();
    case.mixing_rule = MixingRuleDef::Quadratic {
        kij: vec![vec![0.0, 0.02], vec![0.01, 0.0]],
    };
    assert!(validate_case(&case).is_err());

    case.mixing_rule = MixingRuleDef::Quadratic {
        kij: vec![vec![0.0, 0.01]],
    };
    assert!(validate_case(&case).is_err());
}

#[test]
fn rejects_zero_iteration_budget() {
    let mut case = reference_case();
    case.solver.max_ss_iterations = Some(0);
    assert!(validate_case(&case).is_err());
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_feed_is_accepted(a in 0.0f64..1.0, flow in 0.0f64..1e5) {
            let mut case = reference_case();
            case.feed.composition = vec![a, 1.0 - a];
            case.feed.flow_kmol_h = flow;
            prop_assert!(validate_case(&case).is_ok());
        }

        #[test]
        fn unnormalized_feed_is_rejected(a in 0.0f64..1.0, excess in 1e-3f64..1.0) {
            let mut case = reference_case();
            case.feed.composition = vec![a, 1.0 - a + excess];
            prop_assert!(validate_case(&case).is_err());
        }
    }
}
