use rand::Rng;
use serde::Deserialize;
use tracing::trace;

use crate::arm::{ argmax, Arm };
use crate::constants::{ MIN_EPSILON, NUM_EXPLORATORY_TRIALS };
use crate::errors::{ Result, SimulationError };

use super::{ Selection, SelectionKind };

fn default_exploratory_trials() -> usize {
    NUM_EXPLORATORY_TRIALS
}

fn default_floor() -> f64 {
    MIN_EPSILON
}

/// How the exploration rate of a decaying epsilon greedy policy shrinks with
/// the number of turns already played.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonSchedule {
    /// epsilon = 1 / (trial + 1)
    Inverse,
    /// Only explore for the first `exploratory_trials` turns, then keep
    /// exploring with probability `floor`.
    StepDown {
        #[serde(default = "default_exploratory_trials")]
        exploratory_trials: usize,
        #[serde(default = "default_floor")]
        floor: f64,
    },
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        EpsilonSchedule::Inverse
    }
}

impl EpsilonSchedule {
    pub fn validate(&self) -> Result<()> {
        match *self {
            EpsilonSchedule::Inverse => Ok(()),
            EpsilonSchedule::StepDown { floor, .. } if !(0.0..=1.0).contains(&floor) => {
                Err(
                    SimulationError::InvalidSchedule(
                        format!("step-down floor must be in the range [0, 1], got {}", floor)
                    )
                )
            }
            EpsilonSchedule::StepDown { .. } => Ok(()),
        }
    }

    /// Exploration rate for the given turn, counted from 0.
    pub fn epsilon_at(&self, trial_index: usize) -> f64 {
        match *self {
            EpsilonSchedule::Inverse => 1.0 / ((trial_index as f64) + 1.0),
            EpsilonSchedule::StepDown { exploratory_trials, floor } => {
                if trial_index < exploratory_trials { 1.0 } else { floor }
            }
        }
    }
}

pub fn validate_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(SimulationError::EpsilonOutOfRange(epsilon))
    }
}

/// Action selection policy: epsilon greedy.
/// With probability epsilon a uniformly random arm is returned (exploration),
/// otherwise the arm with the highest estimate (exploitation), lowest index
/// first when several arms share the maximum.
pub fn select_epsilon_greedy<R: Rng + ?Sized>(
    arms: &[Arm],
    epsilon: f64,
    rng: &mut R
) -> Result<Selection> {
    if arms.is_empty() {
        return Err(SimulationError::InvariantViolation("no arms to select from".to_string()));
    }
    if rng.gen::<f64>() < epsilon {
        let arm = rng.gen_range(0..arms.len());
        trace!(arm, epsilon, "Random action selected");
        return Ok(Selection { arm, kind: SelectionKind::Explore });
    }
    let arm = select_greedy(arms)?;
    trace!(arm, epsilon, "Greedy action selected");
    Ok(Selection { arm, kind: SelectionKind::Exploit })
}

/// Arm with the highest current estimate.
pub fn select_greedy(arms: &[Arm]) -> Result<usize> {
    argmax(arms.iter().map(Arm::estimate)).ok_or_else(|| {
        SimulationError::InvariantViolation("no arm has a comparable estimate".to_string())
    })
}
