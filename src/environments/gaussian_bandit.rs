use rand::Rng;
use rand_distr::{ Distribution, Normal };
use tracing::trace;

use crate::errors::{ Result, SimulationError };

use super::RewardSource;

/// Arm paying a real valued reward drawn from a unit variance normal
/// distribution centred on its mean.
#[derive(Debug, Clone)]
pub struct GaussianBanditEnvironment {
    mean: f64,
    distribution: Normal<f64>,
}

impl GaussianBanditEnvironment {
    pub fn new(arm: usize, mean: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(SimulationError::NonFiniteMean { arm, value: mean });
        }
        let distribution = Normal::new(mean, 1.0).map_err(|_| {
            SimulationError::NonFiniteMean { arm, value: mean }
        })?;
        trace!(arm, mean, "Creating Gaussian bandit");
        Ok(GaussianBanditEnvironment { mean, distribution })
    }
}

impl RewardSource for GaussianBanditEnvironment {
    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.distribution.sample(rng)
    }

    fn true_mean(&self) -> f64 {
        self.mean
    }
}
