//! Reward sources the agent is pulling. Each one has a true mean that is fixed
//! for its whole life and that the agent never sees directly.

mod bernoulli_bandit;
mod gaussian_bandit;

use rand::Rng;
use serde::Deserialize;

use crate::errors::Result;

pub use bernoulli_bandit::BernoulliBanditEnvironment;
pub use gaussian_bandit::GaussianBanditEnvironment;

/// Anything that can be pulled for a stochastic reward.
pub trait RewardSource {
    /// Draws one reward. Consumes randomness only from `rng`.
    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Expected reward of one pull.
    fn true_mean(&self) -> f64;
}

/// Distribution family shared by every arm of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardModel {
    #[default]
    Bernoulli,
    Gaussian,
}

/// One concrete reward source, as stored inside an arm.
#[derive(Debug, Clone)]
pub enum BanditEnvironment {
    Bernoulli(BernoulliBanditEnvironment),
    Gaussian(GaussianBanditEnvironment),
}

impl BanditEnvironment {
    pub fn new(model: RewardModel, arm: usize, mean: f64) -> Result<Self> {
        Ok(match model {
            RewardModel::Bernoulli => {
                BanditEnvironment::Bernoulli(BernoulliBanditEnvironment::new(arm, mean)?)
            }
            RewardModel::Gaussian => {
                BanditEnvironment::Gaussian(GaussianBanditEnvironment::new(arm, mean)?)
            }
        })
    }

    /// Builds one environment per mean, indexed like `means`.
    pub fn new_as_vector(model: RewardModel, means: &[f64]) -> Result<Vec<BanditEnvironment>> {
        means
            .iter()
            .enumerate()
            .map(|(arm, &mean)| BanditEnvironment::new(model, arm, mean))
            .collect()
    }
}

impl RewardSource for BanditEnvironment {
    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            BanditEnvironment::Bernoulli(bandit) => bandit.pull(rng),
            BanditEnvironment::Gaussian(bandit) => bandit.pull(rng),
        }
    }

    fn true_mean(&self) -> f64 {
        match self {
            BanditEnvironment::Bernoulli(bandit) => bandit.true_mean(),
            BanditEnvironment::Gaussian(bandit) => bandit.true_mean(),
        }
    }
}
