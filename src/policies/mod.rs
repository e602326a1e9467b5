//! Action selection policies.
//!
//! A policy keeps no state of its own: which arm to pull next is decided from
//! the arms' current estimates and pull counts, the turn number, the number of
//! plays so far and the random generator handed in by the caller.

mod epsilon_greedy;
mod optimistic;
mod ucb1;

use std::fmt;

use rand::Rng;
use serde::Deserialize;

use crate::arm::Arm;
use crate::constants::{ OPTIMISTIC_INITIAL_VALUE, OPTIMISTIC_VIRTUAL_PULLS };
use crate::errors::Result;
use crate::estimator::IncrementalMean;

pub use epsilon_greedy::{ select_epsilon_greedy, select_greedy, validate_epsilon, EpsilonSchedule };
pub use optimistic::{ optimistic_estimator, select_optimistic };
pub use ucb1::{ select_ucb1, ucb1_score };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// A random arm was chosen to learn more about the arms.
    Explore,
    /// The arm that currently looks best was chosen.
    Exploit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub arm: usize,
    pub kind: SelectionKind,
}

/// Where in the experiment a selection happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionContext {
    /// Turn of the trial loop, counted from 0.
    pub trial_index: usize,
    /// Every pull made so far, warm-up pulls included.
    pub total_plays: u64,
}

fn default_seed_value() -> f64 {
    OPTIMISTIC_INITIAL_VALUE
}

fn default_virtual_pulls() -> u64 {
    OPTIMISTIC_VIRTUAL_PULLS
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Policy {
    EpsilonGreedy {
        epsilon: f64,
    },
    DecayingEpsilonGreedy {
        #[serde(default)]
        schedule: EpsilonSchedule,
    },
    OptimisticInitialValue {
        #[serde(default = "default_seed_value")]
        seed_value: f64,
        #[serde(default = "default_virtual_pulls")]
        virtual_pulls: u64,
    },
    Ucb1,
}

impl Policy {
    /// Optimistic initial value policy with the default seed.
    pub fn optimistic() -> Self {
        Policy::OptimisticInitialValue {
            seed_value: OPTIMISTIC_INITIAL_VALUE,
            virtual_pulls: OPTIMISTIC_VIRTUAL_PULLS,
        }
    }

    /// Checks the parameters. Called before any arm is built.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Policy::EpsilonGreedy { epsilon } => validate_epsilon(epsilon),
            Policy::DecayingEpsilonGreedy { schedule } => schedule.validate(),
            Policy::OptimisticInitialValue { seed_value, virtual_pulls } => {
                optimistic_estimator(seed_value, virtual_pulls).map(|_| ())
            }
            Policy::Ucb1 => Ok(()),
        }
    }

    /// State every arm's estimator starts in under this policy.
    pub fn initial_estimator(&self) -> Result<IncrementalMean> {
        match *self {
            Policy::OptimisticInitialValue { seed_value, virtual_pulls } => {
                optimistic_estimator(seed_value, virtual_pulls)
            }
            _ => Ok(IncrementalMean::new()),
        }
    }

    /// Whether every arm has to be pulled once before the trial loop.
    pub fn requires_warm_up(&self) -> bool {
        matches!(self, Policy::Ucb1)
    }

    /// Whether selections are split into exploration and exploitation.
    pub fn tracks_exploration(&self) -> bool {
        matches!(self, Policy::EpsilonGreedy { .. } | Policy::DecayingEpsilonGreedy { .. })
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        arms: &[Arm],
        context: SelectionContext,
        rng: &mut R
    ) -> Result<Selection> {
        match *self {
            Policy::EpsilonGreedy { epsilon } => select_epsilon_greedy(arms, epsilon, rng),
            Policy::DecayingEpsilonGreedy { schedule } => {
                select_epsilon_greedy(arms, schedule.epsilon_at(context.trial_index), rng)
            }
            Policy::OptimisticInitialValue { .. } => {
                let arm = select_optimistic(arms)?;
                Ok(Selection { arm, kind: SelectionKind::Exploit })
            }
            Policy::Ucb1 => {
                let arm = select_ucb1(arms, context.total_plays)?;
                Ok(Selection { arm, kind: SelectionKind::Exploit })
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::EpsilonGreedy { epsilon } => write!(f, "epsilon_greedy(eps={})", epsilon),
            Policy::DecayingEpsilonGreedy { schedule: EpsilonSchedule::Inverse } => {
                write!(f, "decaying_epsilon_greedy(1/t)")
            }
            Policy::DecayingEpsilonGreedy {
                schedule: EpsilonSchedule::StepDown { exploratory_trials, floor },
            } => write!(f, "decaying_epsilon_greedy(step {} -> {})", exploratory_trials, floor),
            Policy::OptimisticInitialValue { seed_value, .. } => {
                write!(f, "optimistic_initial_value({})", seed_value)
            }
            Policy::Ucb1 => write!(f, "ucb1"),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::environments::{ BanditEnvironment, RewardModel };
    use crate::errors::SimulationError;

    fn arms_with_estimates(estimates: &[f64]) -> Vec<Arm> {
        estimates
            .iter()
            .map(|&estimate| {
                let environment = BanditEnvironment::new(RewardModel::Bernoulli, 0, 0.5).unwrap();
                Arm::new(environment, IncrementalMean::seeded(estimate, 1))
            })
            .collect()
    }

    #[test]
    fn test_validation() {
        assert!(Policy::EpsilonGreedy { epsilon: 0.1 }.validate().is_ok());
        assert!(
            matches!(
                (Policy::EpsilonGreedy { epsilon: 1.1 }).validate(),
                Err(SimulationError::EpsilonOutOfRange(_))
            )
        );
        assert!(Policy::Ucb1.validate().is_ok());
        assert!(
            (Policy::OptimisticInitialValue { seed_value: f64::NAN, virtual_pulls: 1 })
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_initial_estimators() {
        let optimistic = Policy::optimistic().initial_estimator().unwrap();
        assert_eq!(optimistic.estimate(), OPTIMISTIC_INITIAL_VALUE);
        assert_eq!(optimistic.count(), OPTIMISTIC_VIRTUAL_PULLS);

        let plain = Policy::Ucb1.initial_estimator().unwrap();
        assert_eq!(plain, IncrementalMean::new());
    }

    #[test]
    fn test_decaying_policy_reevaluates_epsilon_each_trial() {
        let policy = Policy::DecayingEpsilonGreedy {
            schedule: EpsilonSchedule::StepDown { exploratory_trials: 5, floor: 0.0 },
        };
        let arms = arms_with_estimates(&[0.1, 0.9]);
        let mut rng = StepRng::new(0, 1);

        for trial_index in 0..10 {
            let context = SelectionContext { trial_index, total_plays: trial_index as u64 };
            let selection = policy.select(&arms, context, &mut rng).unwrap();
            let expected = if trial_index < 5 { SelectionKind::Explore } else { SelectionKind::Exploit };
            assert_eq!(selection.kind, expected, "trial {}", trial_index);
        }
    }

    #[test]
    fn test_ucb1_uses_total_plays() {
        let arms = arms_with_estimates(&[0.1, 0.9]);
        let mut rng = StepRng::new(0, 1);
        let context = SelectionContext { trial_index: 0, total_plays: 0 };

        assert!(Policy::Ucb1.select(&arms, context, &mut rng).is_err());

        let context = SelectionContext { trial_index: 0, total_plays: 2 };
        assert_eq!(Policy::Ucb1.select(&arms, context, &mut rng).unwrap().arm, 1);
    }

    #[test]
    fn test_flags() {
        assert!(Policy::Ucb1.requires_warm_up());
        assert!(!Policy::optimistic().requires_warm_up());
        assert!(Policy::EpsilonGreedy { epsilon: 0.1 }.tracks_exploration());
        assert!(!Policy::optimistic().tracks_exploration());
        assert!(!Policy::Ucb1.tracks_exploration());
    }

    #[test]
    fn test_display() {
        assert_eq!(Policy::EpsilonGreedy { epsilon: 0.1 }.to_string(), "epsilon_greedy(eps=0.1)");
        assert_eq!(Policy::Ucb1.to_string(), "ucb1");
    }
}
