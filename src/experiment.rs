use rand::{ rngs::StdRng, Rng, SeedableRng };
use serde::Deserialize;
use tracing::{ debug, trace };

use crate::arm::{ true_best_arm, Arm };
use crate::constants::{ BANDIT_PROBABILITIES, EPSILON, NUM_OF_TRIALS };
use crate::environments::{ BanditEnvironment, RewardModel };
use crate::errors::{ Result, SimulationError };
use crate::policies::{ Policy, SelectionContext, SelectionKind };
use crate::statistics::{ summarize, ExperimentSummary, TrialCounters };

/// Everything needed to set up one experiment. Nothing is read from global
/// state; the defaults only mirror the constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperimentConfig {
    /// True mean of each arm, in arm order.
    pub true_means: Vec<f64>,
    #[serde(default)]
    pub reward_model: RewardModel,
    pub num_of_trials: usize,
    pub policy: Policy,
    /// Seed for the experiment's random generator. Fresh entropy when `None`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            true_means: BANDIT_PROBABILITIES.to_vec(),
            reward_model: RewardModel::Bernoulli,
            num_of_trials: NUM_OF_TRIALS,
            policy: Policy::EpsilonGreedy { epsilon: EPSILON },
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn new(true_means: Vec<f64>, num_of_trials: usize, policy: Policy) -> Self {
        ExperimentConfig {
            true_means,
            num_of_trials,
            policy,
            ..ExperimentConfig::default()
        }
    }

    pub fn with_reward_model(mut self, reward_model: RewardModel) -> Self {
        self.reward_model = reward_model;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Arms are built, nothing has been pulled yet.
    Init,
    Running,
    /// The trial loop completed and the summary was produced.
    Finalized,
    /// A turn returned an error. The partial logs are kept but never summarized.
    Failed,
}

/// Runs one multi-armed bandit game: a fixed number of turns, each one asking
/// the policy for an arm, pulling it and learning from the reward.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    arms: Vec<Arm>,
    /// Arm with the highest true mean. Only used for bookkeeping.
    best_arm: usize,
    phase: Phase,
    trial_index: usize,
    total_plays: u64,
    reward_log: Vec<f64>,
    selection_log: Vec<usize>,
    counters: TrialCounters,
}

impl Experiment {
    /// Validates the configuration and builds the arms. Any misconfiguration
    /// is reported here, before a single arm is pulled.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        if config.num_of_trials == 0 {
            return Err(SimulationError::InvalidTrialCount(config.num_of_trials));
        }
        if config.true_means.is_empty() {
            return Err(SimulationError::NoArms);
        }
        config.policy.validate()?;

        let estimator = config.policy.initial_estimator()?;
        let arms: Vec<Arm> = BanditEnvironment::new_as_vector(
            config.reward_model,
            &config.true_means
        )?
            .into_iter()
            .map(|environment| Arm::new(environment, estimator))
            .collect();
        let best_arm = true_best_arm(&arms).ok_or(SimulationError::NoArms)?;

        let counters = if config.policy.tracks_exploration() {
            TrialCounters { exploration: Some(0), exploitation: Some(0), suboptimal: 0 }
        } else {
            TrialCounters::default()
        };

        debug!(
            policy = %config.policy,
            arms = arms.len(),
            trials = config.num_of_trials,
            best_arm,
            "Experiment initialized"
        );

        Ok(Experiment {
            reward_log: Vec::with_capacity(config.num_of_trials),
            selection_log: Vec::with_capacity(config.num_of_trials),
            config,
            arms,
            best_arm,
            phase: Phase::Init,
            trial_index: 0,
            total_plays: 0,
            counters,
        })
    }

    /// Runs all trials with a generator built from the configured seed.
    pub fn run(&mut self) -> Result<ExperimentSummary> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs all trials drawing every random number from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ExperimentSummary> {
        match self.phase {
            Phase::Init => {}
            Phase::Failed => {
                return Err(SimulationError::ExperimentFailed);
            }
            Phase::Running | Phase::Finalized => {
                return Err(SimulationError::AlreadyFinalized);
            }
        }
        if self.config.policy.requires_warm_up() {
            self.warm_up(rng);
        }
        self.phase = Phase::Running;

        while self.trial_index < self.config.num_of_trials {
            if let Err(err) = self.step(rng) {
                self.phase = Phase::Failed;
                return Err(err);
            }
        }

        self.phase = Phase::Finalized;
        let summary = self.summary()?;
        debug!(
            policy = %self.config.policy,
            total_reward = summary.total_reward,
            win_rate = summary.win_rate,
            suboptimal = summary.suboptimal_count,
            "Experiment finished"
        );
        Ok(summary)
    }

    /// Pulls every arm once so each one has an estimate and a non-zero count.
    fn warm_up<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (index, arm) in self.arms.iter_mut().enumerate() {
            let reward = arm.pull(rng);
            self.total_plays += 1;
            trace!(arm = index, reward, "Warm-up pull");
        }
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let context = SelectionContext {
            trial_index: self.trial_index,
            total_plays: self.total_plays,
        };
        let selection = self.config.policy.select(&self.arms, context, rng)?;
        let arm = self.arms.get_mut(selection.arm).ok_or_else(|| {
            SimulationError::InvariantViolation(
                format!("policy selected arm {} that does not exist", selection.arm)
            )
        })?;

        let reward = arm.pull(rng);
        self.total_plays += 1;
        self.reward_log.push(reward);
        self.selection_log.push(selection.arm);

        match selection.kind {
            SelectionKind::Explore => {
                if let Some(count) = self.counters.exploration.as_mut() {
                    *count += 1;
                }
            }
            SelectionKind::Exploit => {
                if let Some(count) = self.counters.exploitation.as_mut() {
                    *count += 1;
                }
            }
        }
        if selection.arm != self.best_arm {
            self.counters.suboptimal += 1;
        }

        trace!(
            turn = self.trial_index,
            arm = selection.arm,
            kind = ?selection.kind,
            reward,
            "Playing bandit"
        );
        self.trial_index += 1;
        Ok(())
    }

    /// Summary of the finished experiment. Can be called any number of times
    /// once the experiment has been run, and fails before that.
    pub fn summary(&self) -> Result<ExperimentSummary> {
        if self.phase != Phase::Finalized {
            return Err(SimulationError::NotFinalized);
        }
        let snapshots: Vec<_> = self.arms
            .iter()
            .map(Arm::snapshot)
            .collect();
        Ok(summarize(&self.reward_log, &self.selection_log, &snapshots, self.counters))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn total_plays(&self) -> u64 {
        self.total_plays
    }
}
