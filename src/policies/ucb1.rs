use tracing::trace;

use crate::arm::{ argmax, Arm };
use crate::errors::{ Result, SimulationError };

/// Upper confidence bound of one arm:
///
/// estimate + sqrt(2 * ln(total_plays) / pull_count)
///
/// Both counts have to be positive, which the warm-up pull of every arm
/// guarantees. Anything else means the experiment skipped its warm-up.
pub fn ucb1_score(estimate: f64, total_plays: u64, pull_count: u64) -> Result<f64> {
    if total_plays == 0 {
        return Err(
            SimulationError::InvariantViolation(
                "UCB1 evaluated before any arm was played".to_string()
            )
        );
    }
    if pull_count == 0 {
        return Err(
            SimulationError::InvariantViolation(
                "UCB1 evaluated on an arm that was never pulled".to_string()
            )
        );
    }
    let bonus = ((2.0 * (total_plays as f64).ln()) / (pull_count as f64)).sqrt();
    Ok(estimate + bonus)
}

/// Arm with the highest upper confidence bound, lowest index on ties.
pub fn select_ucb1(arms: &[Arm], total_plays: u64) -> Result<usize> {
    let scores = arms
        .iter()
        .map(|arm| ucb1_score(arm.estimate(), total_plays, arm.pull_count()))
        .collect::<Result<Vec<f64>>>()?;
    let arm = argmax(scores.iter().copied()).ok_or_else(|| {
        SimulationError::InvariantViolation("no arms to select from".to_string())
    })?;
    trace!(arm, total_plays, ?scores, "UCB1 action selected");
    Ok(arm)
}
