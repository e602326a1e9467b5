/// Number of turns played in one experiment when nothing else is configured.
pub const NUM_OF_TRIALS: usize = 10_000;
/// Win probabilities of the Bernoulli arms used by the policy comparison.
pub const BANDIT_PROBABILITIES: [f64; 3] = [0.2, 0.5, 0.75];
/// Represents the probability with which a random action is selected. The
/// probability that the agent exploits what it has learned is (1 - EPSILON).
/// Expected to be in bounds 0 <= EPSILON <= 1.
pub const EPSILON: f64 = 0.1;
/// Initial estimate given to every arm by the optimistic initial value policy.
/// Has to be above any reward the arms can realistically produce.
pub const OPTIMISTIC_INITIAL_VALUE: f64 = 5.0;
/// How many pseudo-observations the optimistic seed counts for.
pub const OPTIMISTIC_VIRTUAL_PULLS: u64 = 1;
/// Number of pure exploration turns before a step-down schedule drops to its floor.
pub const NUM_EXPLORATORY_TRIALS: usize = 1000;
/// Exploration rate a step-down schedule settles on.
pub const MIN_EPSILON: f64 = 0.01;
/// Means of the Gaussian arms used by the epsilon comparison.
pub const GAUSSIAN_MEANS: [f64; 3] = [1.5, 2.5, 3.5];
/// Exploration rates compared against each other on Gaussian arms.
pub const COMPARED_EPSILONS: [f64; 3] = [0.1, 0.05, 0.01];
/// Number of turns in each run of the epsilon comparison.
pub const NUM_OF_COMPARISON_TRIALS: usize = 100_000;
/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Name of the optional configuration file, without extension.
pub const CONFIG_FILE_NAME: &str = "bandit";
/// Prefix of environment variables overriding the configuration.
pub const CONFIG_ENV_PREFIX: &str = "BANDIT";
