use std::path::Path;

use ::config::{ builder::DefaultState, Config, ConfigBuilder, Environment, File };
use serde::Deserialize;

use crate::constants::{
    BANDIT_PROBABILITIES,
    COMPARED_EPSILONS,
    CONFIG_ENV_PREFIX,
    CONFIG_FILE_NAME,
    DEFAULT_LOG_LEVEL,
    GAUSSIAN_MEANS,
    NUM_OF_COMPARISON_TRIALS,
    NUM_OF_TRIALS,
};
use crate::errors::Result;
use crate::policies::EpsilonSchedule;

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_trials() -> usize {
    NUM_OF_TRIALS
}

fn default_bandit_probabilities() -> Vec<f64> {
    BANDIT_PROBABILITIES.to_vec()
}

fn default_gaussian_means() -> Vec<f64> {
    GAUSSIAN_MEANS.to_vec()
}

fn default_epsilons() -> Vec<f64> {
    COMPARED_EPSILONS.to_vec()
}

fn default_comparison_trials() -> usize {
    NUM_OF_COMPARISON_TRIALS
}

fn default_true() -> bool {
    true
}

/// Settings for the four-policy comparison on Bernoulli arms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyComparisonConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bandit_probabilities")]
    pub bandit_probabilities: Vec<f64>,
    /// Schedule of the decaying epsilon greedy entry.
    #[serde(default)]
    pub decaying_schedule: EpsilonSchedule,
    #[serde(default = "default_trials")]
    pub trials: usize,
}

impl Default for PolicyComparisonConfig {
    fn default() -> Self {
        PolicyComparisonConfig {
            enabled: true,
            bandit_probabilities: default_bandit_probabilities(),
            decaying_schedule: EpsilonSchedule::default(),
            trials: default_trials(),
        }
    }
}

/// Settings for comparing exploration rates on Gaussian arms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpsilonComparisonConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_gaussian_means")]
    pub means: Vec<f64>,
    #[serde(default = "default_epsilons")]
    pub epsilons: Vec<f64>,
    #[serde(default = "default_comparison_trials")]
    pub trials: usize,
}

impl Default for EpsilonComparisonConfig {
    fn default() -> Self {
        EpsilonComparisonConfig {
            enabled: true,
            means: default_gaussian_means(),
            epsilons: default_epsilons(),
            trials: default_comparison_trials(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base seed; experiment n of a comparison uses `seed + n`.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub policy_comparison: PolicyComparisonConfig,
    #[serde(default)]
    pub epsilon_comparison: EpsilonComparisonConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: default_log_level(),
            seed: None,
            policy_comparison: PolicyComparisonConfig::default(),
            epsilon_comparison: EpsilonComparisonConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the optional `bandit.{toml,yaml,json}` file from the working
    /// directory, then `BANDIT_` environment variables on top of it.
    pub fn from_env() -> Result<Self> {
        Self::load(Config::builder().add_source(File::with_name(CONFIG_FILE_NAME).required(false)))
    }

    /// Like [`AppConfig::from_env`] but reads the given file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(Config::builder().add_source(File::from(path)))
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
