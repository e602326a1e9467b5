use rand::distributions::{ Bernoulli, Distribution };
use rand::Rng;
use tracing::trace;

use crate::errors::{ Result, SimulationError };

use super::RewardSource;

/// BernoulliBanditEnvironment represents a lever in the slot machine.
/// It has a certain probability of winning that is constant and does not
/// change over time. The agent does not know it and has to learn it.
#[derive(PartialEq, Debug, Clone)]
pub struct BernoulliBanditEnvironment {
    probability: f64,
    distribution: Bernoulli,
}

impl BernoulliBanditEnvironment {
    /// Creates a new bandit winning with the given probability. `arm` is only
    /// used to report which arm was misconfigured.
    pub fn new(arm: usize, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SimulationError::ProbabilityOutOfRange { arm, value: probability });
        }
        let distribution = Bernoulli::new(probability).map_err(|_| {
            SimulationError::ProbabilityOutOfRange { arm, value: probability }
        })?;
        trace!(arm, probability, "Creating Bernoulli bandit");
        Ok(BernoulliBanditEnvironment { probability, distribution })
    }
}

impl RewardSource for BernoulliBanditEnvironment {
    /// Pulling returns 1.0 for a win and 0.0 for a loss.
    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.distribution.sample(rng) {
            true => 1.0,
            false => 0.0,
        }
    }

    fn true_mean(&self) -> f64 {
        self.probability
    }
}
