use vf_case::schema::*;
use vf_case::{load_case, load_json, load_yaml, reference_case, save_json, save_yaml};

#[test]
fn roundtrip_yaml_reference_case() {
    let case = reference_case();

    let path = std::env::temp_dir().join("vf_case_roundtrip_reference.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_custom_components() {
    let mut case = reference_case();
    case.name = "custom pair".to_string();
    case.components = vec![
        ComponentDef::Custom {
            name: "hexane".to_string(),
            tc_k: 507.6,
            pc_bar: 30.25,
            zc: 0.266,
            vc_cm3_per_mol: 371.0,
            omega: 0.301,
            antoine: [13.8193, 2696.04, 224.317],
            groups: vec![
                GroupCountDef {
                    group: "CH3".to_string(),
                    count: 2,
                },
                GroupCountDef {
                    group: "CH2".to_string(),
                    count: 4,
                },
            ],
        },
        ComponentDef::Preset {
            name: "toluene".to_string(),
        },
    ];
    case.mixing_rule = MixingRuleDef::Quadratic {
        kij: vec![vec![0.0, 0.01], vec![0.01, 0.0]],
    };
    case.initial_guess = None;
    case.solver.tol = Some(1e-9);

    let path = std::env::temp_dir().join("vf_case_roundtrip_custom.json");
    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(case, loaded);

    let by_ext = load_case(&path).unwrap();
    assert_eq!(case, by_ext);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let yaml = r#"
version: 1
name: minimal
components:
  - type: Preset
    name: benzene
  - type: Preset
    name: toluene
feed:
  flow_kmol_h: 100.0
  temperature_k: 358.15
  pressure_bar: 0.925
  composition: [0.75, 0.25]
"#;
    let case: Case = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(case.mixing_rule, MixingRuleDef::default());
    assert!(case.initial_guess.is_none());
    assert_eq!(case.solver, SolverDef::default());
    vf_case::validate_case(&case).unwrap();
}

#[test]
fn save_rejects_invalid_case() {
    let mut case = reference_case();
    case.feed.composition = vec![0.5, 0.6];
    let path = std::env::temp_dir().join("vf_case_roundtrip_invalid.yaml");
    assert!(save_yaml(&path, &case).is_err());
}
