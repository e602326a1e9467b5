//! Folding the raw logs of a finished experiment into the numbers reports need.
//! Everything here is a pure function of its inputs.

use crate::arm::{ argmax, ArmSnapshot };

/// Counters kept by the driver while the trial loop runs.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct TrialCounters {
    /// `None` when the policy does not distinguish exploration from exploitation.
    pub exploration: Option<u64>,
    pub exploitation: Option<u64>,
    /// Turns on which an arm other than the true best one was pulled.
    pub suboptimal: u64,
}

/// Everything known about an experiment once it is over.
#[derive(PartialEq, Debug, Clone)]
pub struct ExperimentSummary {
    /// Reward received on each turn, indexed by turn.
    pub reward_log: Vec<f64>,
    /// Arm pulled on each turn, indexed by turn.
    pub selection_log: Vec<usize>,
    pub cumulative_rewards: Vec<f64>,
    /// Running win rate: cumulative reward divided by the number of turns so far.
    pub cumulative_average: Vec<f64>,
    pub arms: Vec<ArmSnapshot>,
    /// How often each arm was chosen during the trial loop, warm-up excluded.
    pub selection_frequency: Vec<u64>,
    pub best_arm: usize,
    pub total_reward: f64,
    pub win_rate: f64,
    pub exploration_count: Option<u64>,
    pub exploitation_count: Option<u64>,
    pub suboptimal_count: u64,
    pub optimal_count: u64,
    pub suboptimal_fraction: f64,
    /// Sum of |true mean - estimate| over all arms. The closer to 0 the
    /// better the agent has learned the arms.
    pub learning_error: f64,
}

impl ExperimentSummary {
    pub fn num_of_trials(&self) -> usize {
        self.reward_log.len()
    }
}

/// Running sum of the rewards.
pub fn cumulative_sum(rewards: &[f64]) -> Vec<f64> {
    rewards
        .iter()
        .scan(0.0, |total, &reward| {
            *total += reward;
            Some(*total)
        })
        .collect()
}

/// cumulative_average[i] = sum(rewards[0..=i]) / (i + 1)
pub fn cumulative_average(rewards: &[f64]) -> Vec<f64> {
    cumulative_sum(rewards)
        .into_iter()
        .enumerate()
        .map(|(index, total)| total / ((index as f64) + 1.0))
        .collect()
}

pub fn learning_error(arms: &[ArmSnapshot]) -> f64 {
    arms.iter()
        .map(|arm| (arm.true_mean - arm.estimate).abs())
        .sum()
}

pub fn summarize(
    reward_log: &[f64],
    selection_log: &[usize],
    arms: &[ArmSnapshot],
    counters: TrialCounters
) -> ExperimentSummary {
    let num_of_trials = reward_log.len();
    let cumulative_rewards = cumulative_sum(reward_log);
    let total_reward = cumulative_rewards.last().copied().unwrap_or(0.0);
    let win_rate = if num_of_trials == 0 { 0.0 } else { total_reward / (num_of_trials as f64) };

    let mut selection_frequency = vec![0; arms.len()];
    for &arm in selection_log {
        if let Some(frequency) = selection_frequency.get_mut(arm) {
            *frequency += 1;
        }
    }

    let suboptimal_fraction = if num_of_trials == 0 {
        0.0
    } else {
        (counters.suboptimal as f64) / (num_of_trials as f64)
    };

    ExperimentSummary {
        reward_log: reward_log.to_vec(),
        selection_log: selection_log.to_vec(),
        cumulative_average: cumulative_average(reward_log),
        cumulative_rewards,
        arms: arms.to_vec(),
        selection_frequency,
        best_arm: argmax(arms.iter().map(|arm| arm.true_mean)).unwrap_or(0),
        total_reward,
        win_rate,
        exploration_count: counters.exploration,
        exploitation_count: counters.exploitation,
        suboptimal_count: counters.suboptimal,
        optimal_count: (num_of_trials as u64).saturating_sub(counters.suboptimal),
        suboptimal_fraction,
        learning_error: learning_error(arms),
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    fn snapshots() -> Vec<ArmSnapshot> {
        vec![
            ArmSnapshot { true_mean: 0.2, estimate: 0.25, pull_count: 2 },
            ArmSnapshot { true_mean: 0.75, estimate: 0.7, pull_count: 3 }
        ]
    }

    #[test]
    fn test_cumulative_sum_and_average() {
        let rewards = [1.0, 0.0, 1.0, 1.0];

        assert_eq!(cumulative_sum(&rewards), vec![1.0, 1.0, 2.0, 3.0]);
        assert_eq!(cumulative_average(&rewards), vec![1.0, 0.5, 2.0 / 3.0, 0.75]);
    }

    #[test]
    fn test_empty_log() {
        assert!(cumulative_average(&[]).is_empty());
        let summary = summarize(&[], &[], &snapshots(), TrialCounters::default());
        assert_eq!(summary.total_reward, 0.0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.suboptimal_fraction, 0.0);
    }

    #[test]
    fn test_summarize() {
        let counters = TrialCounters { exploration: Some(1), exploitation: Some(3), suboptimal: 1 };
        let summary = summarize(&[0.0, 1.0, 1.0, 0.0], &[0, 1, 1, 1], &snapshots(), counters);

        assert_eq!(summary.num_of_trials(), 4);
        assert_eq!(summary.total_reward, 2.0);
        assert_eq!(summary.win_rate, 0.5);
        assert_eq!(summary.selection_frequency, vec![1, 3]);
        assert_eq!(summary.best_arm, 1);
        assert_eq!(summary.exploration_count, Some(1));
        assert_eq!(summary.exploitation_count, Some(3));
        assert_eq!(summary.optimal_count, 3);
        assert_relative_eq!(summary.suboptimal_fraction, 0.25);
        assert_relative_eq!(summary.learning_error, 0.1, epsilon = 1e-12);
        assert_eq!(*summary.cumulative_average.last().unwrap(), summary.win_rate);
    }

    #[test]
    fn test_summary_folding_is_idempotent() {
        let rewards = [0.3, 1.7, -0.4, 2.2, 0.9];
        let selections = [0, 1, 1, 0, 1];
        let counters = TrialCounters { exploration: None, exploitation: None, suboptimal: 2 };

        let first = summarize(&rewards, &selections, &snapshots(), counters);
        let second = summarize(&rewards, &selections, &snapshots(), counters);

        assert_eq!(first, second);
    }
}
