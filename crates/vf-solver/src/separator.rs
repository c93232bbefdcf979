//! Flash drum: equilibrium flash followed by the flow split.

use crate::error::SolverResult;
use crate::flash::{FlashOptions, FlashResult, FlashSpec, flash};
use crate::split::{PhaseFlows, phase_flows};
use tracing::info;
use vf_thermo::FugacityModel;

/// Equilibrium phases and the flows leaving the drum.
#[derive(Debug, Clone)]
pub struct SeparatorSolution {
    pub feed_flow: f64,
    pub z: Vec<f64>,
    pub flash: FlashResult,
    pub flows: PhaseFlows,
}

impl SeparatorSolution {
    /// `|V + L - F|`
    pub fn mass_balance_error(&self) -> f64 {
        (self.flows.total() - self.feed_flow).abs()
    }

    /// `max_i |y_i·V + x_i·L - F·z_i|`
    pub fn component_balance_error(&self) -> f64 {
        self.z
            .iter()
            .zip(self.flash.y.iter().zip(&self.flash.x))
            .map(|(zi, (yi, xi))| {
                (yi * self.flows.vapor + xi * self.flows.liquid - self.feed_flow * zi).abs()
            })
            .fold(0.0, f64::max)
    }
}

/// Flash the feed and split it into vapor and liquid flows.
pub fn solve_separator<M: FugacityModel + ?Sized>(
    model: &M,
    spec: &FlashSpec,
    options: &FlashOptions,
) -> SolverResult<SeparatorSolution> {
    let result = flash(model, spec, options)?;
    let z = spec.z.as_slice().to_vec();
    let flows = phase_flows(spec.feed_flow, &z, &result.y, &result.x)?;

    info!(
        model = model.name(),
        iterations = result.iterations,
        method = result.method.label(),
        vapor = flows.vapor,
        liquid = flows.liquid,
        "separator solved"
    );

    Ok(SeparatorSolution {
        feed_flow: spec.feed_flow,
        z,
        flash: result,
        flows,
    })
}
