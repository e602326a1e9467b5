use tracing::trace;

use crate::arm::Arm;
use crate::errors::{ Result, SimulationError };
use crate::estimator::IncrementalMean;

use super::epsilon_greedy::select_greedy;

/// Estimator every arm starts with under the optimistic initial value policy.
/// The seed sits above any reward the arm can pay, so each arm keeps being
/// picked until its estimate has come down close to its true mean.
pub fn optimistic_estimator(seed_value: f64, virtual_pulls: u64) -> Result<IncrementalMean> {
    if !seed_value.is_finite() {
        return Err(SimulationError::InvalidSeedValue(seed_value));
    }
    Ok(IncrementalMean::seeded(seed_value, virtual_pulls))
}

/// Always greedy; exploration only comes from the inflated starting estimates.
pub fn select_optimistic(arms: &[Arm]) -> Result<usize> {
    let arm = select_greedy(arms)?;
    trace!(arm, "Optimistic greedy action selected");
    Ok(arm)
}
