//! Text and JSON rendering of a solved separator.

use serde::Serialize;
use vf_core::units::{to_bar, to_kelvin};
use vf_solver::{FlashSpec, SaturationResult, SeparatorSolution};

const RULE: &str = "-----------------------------------------------";

/// Molar volumes [cm³/mol] of the two phases.
#[derive(Debug, Clone, Copy)]
pub struct PhaseVolumes {
    pub vapor: f64,
    pub liquid: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashReport {
    pub case: String,
    pub model: String,
    pub components: Vec<String>,
    pub temperature_k: f64,
    pub pressure_bar: f64,
    pub feed_flow_kmol_h: f64,
    pub feed: Vec<f64>,
    pub vapor_flow_kmol_h: f64,
    pub liquid_flow_kmol_h: f64,
    pub vapor_fraction: f64,
    pub two_phase: bool,
    pub y: Vec<f64>,
    pub x: Vec<f64>,
    pub k: Vec<f64>,
    pub vapor_volume_cm3_per_mol: f64,
    pub liquid_volume_cm3_per_mol: f64,
    pub iterations: usize,
    pub method: String,
    pub residual: f64,
}

impl FlashReport {
    pub fn new(
        case: &str,
        model: &str,
        components: &[&str],
        spec: &FlashSpec,
        sol: &SeparatorSolution,
        volumes: PhaseVolumes,
    ) -> Self {
        Self {
            case: case.to_string(),
            model: model.to_string(),
            components: components.iter().map(|c| c.to_string()).collect(),
            temperature_k: to_kelvin(spec.t),
            pressure_bar: to_bar(spec.p),
            feed_flow_kmol_h: sol.feed_flow,
            feed: sol.z.clone(),
            vapor_flow_kmol_h: sol.flows.vapor,
            liquid_flow_kmol_h: sol.flows.liquid,
            vapor_fraction: sol.flash.beta,
            two_phase: sol.flash.is_two_phase(),
            y: sol.flash.y.clone(),
            x: sol.flash.x.clone(),
            k: sol.flash.k.clone(),
            vapor_volume_cm3_per_mol: volumes.vapor,
            liquid_volume_cm3_per_mol: volumes.liquid,
            iterations: sol.flash.iterations,
            method: sol.flash.method.label().to_string(),
            residual: sol.flash.residual,
        }
    }

    /// Flow and composition summary, one block per phase.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!(
            "Vapor Flow (V) : {} kmol/h\n",
            self.vapor_flow_kmol_h
        ));
        for (i, (name, y)) in self.components.iter().zip(&self.y).enumerate() {
            out.push_str(&format!(
                "     {name} fraction in vapor (y{}) : {y}\n",
                i + 1
            ));
        }
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!(
            "Liquid Flow (L) : {} kmol/h\n",
            self.liquid_flow_kmol_h
        ));
        for (i, (name, x)) in self.components.iter().zip(&self.x).enumerate() {
            out.push_str(&format!(
                "     {name} fraction in liquid (x{}) : {x}\n",
                i + 1
            ));
        }
        out
    }
}

/// One line per saturation result, plus the incipient phase composition.
pub fn render_saturation(
    kind: &str,
    phase: &str,
    components: &[&str],
    result: &SaturationResult,
) -> String {
    let mut out = format!(
        "{kind} pressure : {} bar ({} iterations)\n",
        to_bar(result.pressure),
        result.iterations
    );
    for (name, v) in components.iter().zip(&result.incipient) {
        out.push_str(&format!("     {name} fraction in incipient {phase} : {v}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_core::units::{bar, k};
    use vf_solver::{FlashMethod, FlashResult, PhaseFlows};
    use vf_thermo::MoleFractions;

    fn sample() -> FlashReport {
        let spec = FlashSpec::new(
            100.0,
            k(358.15),
            bar(0.925),
            MoleFractions::new(vec![0.75, 0.25]).unwrap(),
        );
        let sol = SeparatorSolution {
            feed_flow: 100.0,
            z: vec![0.75, 0.25],
            flash: FlashResult {
                y: vec![0.8, 0.2],
                x: vec![0.5, 0.5],
                beta: 250.0 / 300.0,
                k: vec![1.6, 0.4],
                iterations: 12,
                method: FlashMethod::SuccessiveSubstitution,
                residual: 1e-12,
            },
            flows: PhaseFlows {
                vapor: 250.0 / 3.0,
                liquid: 50.0 / 3.0,
            },
        };
        let volumes = PhaseVolumes {
            vapor: 30_000.0,
            liquid: 95.0,
        };
        FlashReport::new(
            "sample",
            "Peng-Robinson",
            &["benzene", "toluene"],
            &spec,
            &sol,
            volumes,
        )
    }

    #[test]
    fn text_layout() {
        let text = sample().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], RULE);
        assert!(lines[1].starts_with("Vapor Flow (V) : 83.33"));
        assert!(lines[1].ends_with(" kmol/h"));
        assert_eq!(lines[2], "     benzene fraction in vapor (y1) : 0.8");
        assert_eq!(lines[3], "     toluene fraction in vapor (y2) : 0.2");
        assert_eq!(lines[4], RULE);
        assert_eq!(lines[6], "     benzene fraction in liquid (x1) : 0.5");
        assert_eq!(lines[7], "     toluene fraction in liquid (x2) : 0.5");
    }

    #[test]
    fn json_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["components"][1], "toluene");
        assert_eq!(json["two_phase"], true);
        assert_eq!(json["liquid_volume_cm3_per_mol"].as_f64().unwrap(), 95.0);
        assert_eq!(json["method"], "successive substitution");
        assert!((json["pressure_bar"].as_f64().unwrap() - 0.925).abs() < 1e-12);
    }
}
