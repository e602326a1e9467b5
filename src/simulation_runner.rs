use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::constants::EPSILON;
use crate::environments::RewardModel;
use crate::errors::Result;
use crate::experiment::{ Experiment, ExperimentConfig };
use crate::policies::{ EpsilonSchedule, Policy };
use crate::statistics::ExperimentSummary;

/// A finished experiment together with the label it was run under.
#[derive(Debug, Clone)]
pub struct LabelledSummary {
    pub label: String,
    pub summary: ExperimentSummary,
}

/// Runs several independent experiments in parallel. Every experiment still
/// plays its turns one after the other on its own generator; only whole
/// experiments are spread over threads.
#[derive(Debug, Clone, Default)]
pub struct SimulationRunner {
    experiments: Vec<(String, ExperimentConfig)>,
}

impl SimulationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>, config: ExperimentConfig) -> &mut Self {
        self.experiments.push((label.into(), config));
        self
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// The four policies playing the same Bernoulli arms, the decaying one
    /// following `schedule`. With a seed, the n-th experiment is seeded with
    /// `seed + n`.
    pub fn policy_comparison(
        true_means: &[f64],
        schedule: EpsilonSchedule,
        num_of_trials: usize,
        seed: Option<u64>
    ) -> Self {
        let policies = [
            Policy::EpsilonGreedy { epsilon: EPSILON },
            Policy::DecayingEpsilonGreedy { schedule },
            Policy::optimistic(),
            Policy::Ucb1,
        ];
        Self::from_policies(true_means, RewardModel::Bernoulli, &policies, num_of_trials, seed)
    }

    /// Fixed epsilon greedy with several exploration rates on Gaussian arms.
    pub fn epsilon_comparison(
        true_means: &[f64],
        epsilons: &[f64],
        num_of_trials: usize,
        seed: Option<u64>
    ) -> Self {
        let policies: Vec<Policy> = epsilons
            .iter()
            .map(|&epsilon| Policy::EpsilonGreedy { epsilon })
            .collect();
        Self::from_policies(true_means, RewardModel::Gaussian, &policies, num_of_trials, seed)
    }

    fn from_policies(
        true_means: &[f64],
        reward_model: RewardModel,
        policies: &[Policy],
        num_of_trials: usize,
        seed: Option<u64>
    ) -> Self {
        let mut runner = SimulationRunner::new();
        for (index, &policy) in policies.iter().enumerate() {
            let mut config = ExperimentConfig::new(
                true_means.to_vec(),
                num_of_trials,
                policy
            ).with_reward_model(reward_model);
            config.seed = seed.map(|seed| seed.wrapping_add(index as u64));
            runner.add(policy.to_string(), config);
        }
        runner
    }

    /// Validates every configuration first, so nothing runs if any of them is
    /// wrong, then runs all experiments in parallel. Results keep the order in
    /// which experiments were added.
    pub fn run_all_in_parallel(&self) -> Result<Vec<LabelledSummary>> {
        let experiments = self.experiments
            .iter()
            .map(|(label, config)| Ok((label.clone(), Experiment::new(config.clone())?)))
            .collect::<Result<Vec<(String, Experiment)>>>()?;

        let start_time = Instant::now();
        let results = experiments
            .into_par_iter()
            .map(|(label, mut experiment)| {
                let summary = experiment.run()?;
                Ok(LabelledSummary { label, summary })
            })
            .collect::<Result<Vec<LabelledSummary>>>()?;
        info!(
            experiments = results.len(),
            elapsed = ?start_time.elapsed(),
            "Parallel run finished"
        );
        Ok(results)
    }
}
