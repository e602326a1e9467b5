/// Running mean of the rewards observed for one arm.
///
/// new_estimate = old_estimate + (reward - old_estimate) / n
///
/// This is the sample average written as an update with step size 1/n, so no
/// sum of rewards has to be kept around and every update is O(1).
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct IncrementalMean {
    estimate: f64,
    count: u64,
}

impl IncrementalMean {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the mean as if `virtual_count` observations equal to
    /// `initial_value` had already been made.
    pub fn seeded(initial_value: f64, virtual_count: u64) -> Self {
        IncrementalMean { estimate: initial_value, count: virtual_count }
    }

    pub fn update(&mut self, reward: f64) {
        self.count += 1;
        self.estimate += (reward - self.estimate) / (self.count as f64);
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::{ rngs::StdRng, Rng, SeedableRng };

    use super::*;

    #[test]
    fn test_new_estimator_is_empty() {
        let mean = IncrementalMean::new();
        assert_eq!(mean.estimate(), 0.0);
        assert_eq!(mean.count(), 0);
    }

    #[test]
    fn test_first_update_replaces_unseeded_estimate() {
        let mut mean = IncrementalMean::new();
        mean.update(0.7);
        assert_eq!(mean.estimate(), 0.7);
        assert_eq!(mean.count(), 1);
    }

    #[test]
    fn test_estimate_equals_arithmetic_mean() {
        let mut rng = StdRng::seed_from_u64(99);
        let rewards: Vec<f64> = (0..10_000).map(|_| rng.gen_range(-5.0..20.0)).collect();

        let mut mean = IncrementalMean::new();
        rewards.iter().for_each(|&r| mean.update(r));

        let expected = rewards.iter().sum::<f64>() / (rewards.len() as f64);
        assert_relative_eq!(mean.estimate(), expected, max_relative = 1e-9);
        assert_eq!(mean.count(), rewards.len() as u64);
    }

    #[test]
    fn test_update_order_does_not_matter() {
        let rewards = [1.0, 0.0, 0.0, 1.0, 1.0, 3.5, -2.0];
        let mut forward = IncrementalMean::new();
        let mut backward = IncrementalMean::new();

        rewards.iter().for_each(|&r| forward.update(r));
        rewards
            .iter()
            .rev()
            .for_each(|&r| backward.update(r));

        assert_relative_eq!(forward.estimate(), backward.estimate(), max_relative = 1e-9);
    }

    #[test]
    fn test_seed_counts_as_virtual_observations() {
        let mut mean = IncrementalMean::seeded(5.0, 1);
        mean.update(1.0);
        mean.update(0.0);

        // (5 + 1 + 0) / 3
        assert_relative_eq!(mean.estimate(), 2.0, max_relative = 1e-12);
        assert_eq!(mean.count(), 3);
    }

    #[test]
    fn test_seed_without_virtual_observations_is_forgotten() {
        let mut mean = IncrementalMean::seeded(5.0, 0);
        assert_eq!(mean.estimate(), 5.0);
        mean.update(1.0);
        assert_eq!(mean.estimate(), 1.0);
    }
}
