use vf_case::{compile_case, reference_case};
use vf_solver::solve_separator;

#[test]
fn reference_case_solves_with_balances() {
    let compiled = compile_case(&reference_case()).unwrap();
    let sol = solve_separator(&compiled.eos, &compiled.spec, &compiled.options).unwrap();

    assert!(sol.mass_balance_error() < 1e-6 * 1000.0);
    assert!(sol.component_balance_error() < 1e-6 * 1000.0);
    let sy: f64 = sol.flash.y.iter().sum();
    let sx: f64 = sol.flash.x.iter().sum();
    assert!((sy - 1.0).abs() < 1e-9);
    assert!((sx - 1.0).abs() < 1e-9);
    assert!(sol.flash.y[0] > sol.flash.x[0]);
}

#[test]
fn quadratic_case_solves_inside_envelope() {
    let mut case = reference_case();
    case.mixing_rule = vf_case::MixingRuleDef::Quadratic { kij: Vec::new() };
    case.feed.pressure_bar = 0.925;
    let compiled = compile_case(&case).unwrap();
    let sol = solve_separator(&compiled.eos, &compiled.spec, &compiled.options).unwrap();

    assert!(sol.flash.is_two_phase(), "beta = {}", sol.flash.beta);
    assert!((sol.flows.vapor - sol.flash.beta * 1000.0).abs() < 1e-6);
}
