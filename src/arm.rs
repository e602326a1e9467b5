use rand::Rng;

use crate::environments::{ BanditEnvironment, RewardSource };
use crate::estimator::IncrementalMean;

/// An arm couples a reward source, whose mean is hidden from the agent, with
/// what the agent has learned about it so far.
#[derive(Debug, Clone)]
pub struct Arm {
    environment: BanditEnvironment,
    estimator: IncrementalMean,
}

/// Copy of an arm's state, handed to reports once the experiment is over.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ArmSnapshot {
    pub true_mean: f64,
    pub estimate: f64,
    pub pull_count: u64,
}

impl Arm {
    pub fn new(environment: BanditEnvironment, estimator: IncrementalMean) -> Self {
        Arm { environment, estimator }
    }

    /// Pulls the arm and folds the reward into the estimate.
    pub fn pull<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let reward = self.environment.pull(rng);
        self.estimator.update(reward);
        reward
    }

    pub fn estimate(&self) -> f64 {
        self.estimator.estimate()
    }

    pub fn pull_count(&self) -> u64 {
        self.estimator.count()
    }

    /// Only for statistics. Policies must never look at it.
    pub fn true_mean(&self) -> f64 {
        self.environment.true_mean()
    }

    pub fn snapshot(&self) -> ArmSnapshot {
        ArmSnapshot {
            true_mean: self.true_mean(),
            estimate: self.estimate(),
            pull_count: self.pull_count(),
        }
    }
}

/// Index of the arm with the highest true mean, first one on ties.
pub fn true_best_arm(arms: &[Arm]) -> Option<usize> {
    argmax(arms.iter().map(Arm::true_mean))
}

/// Index of the largest value. Ties go to the lowest index and NaN values are
/// never selected.
pub fn argmax<I>(values: I) -> Option<usize> where I: IntoIterator<Item = f64> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.into_iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => {
                best = Some((index, value));
            }
        }
    }
    best.map(|(index, _)| index)
}
