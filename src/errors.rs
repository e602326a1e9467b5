use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Number of trials must be at least 1, got {0}")]
    InvalidTrialCount(usize),
    #[error("At least one arm has to be configured")]
    NoArms,
    #[error("Probability of arm {arm} must be in the range [0, 1], got {value}")]
    ProbabilityOutOfRange { arm: usize, value: f64 },
    #[error("Mean of arm {arm} must be finite, got {value}")]
    NonFiniteMean { arm: usize, value: f64 },
    #[error("Epsilon must be in the range [0, 1], got {0}")]
    EpsilonOutOfRange(f64),
    #[error("Invalid epsilon schedule: {0}")]
    InvalidSchedule(String),
    #[error("Optimistic seed value must be finite, got {0}")]
    InvalidSeedValue(f64),
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Experiment has already been run")]
    AlreadyFinalized,
    #[error("Experiment stopped after an earlier error and cannot be resumed")]
    ExperimentFailed,
    #[error("Experiment has not finished, no summary is available yet")]
    NotFinalized,
    #[error("Cannot load configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Cannot build report table: {0}")]
    Report(#[from] PolarsError),
}

impl SimulationError {
    /// True for the errors raised while validating an experiment before it runs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidTrialCount(_)
                | SimulationError::NoArms
                | SimulationError::ProbabilityOutOfRange { .. }
                | SimulationError::NonFiniteMean { .. }
                | SimulationError::EpsilonOutOfRange(_)
                | SimulationError::InvalidSchedule(_)
                | SimulationError::InvalidSeedValue(_)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimulationError::ProbabilityOutOfRange { arm: 2, value: 1.5 };
        assert_eq!(err.to_string(), "Probability of arm 2 must be in the range [0, 1], got 1.5");
        assert_eq!(
            SimulationError::InvalidTrialCount(0).to_string(),
            "Number of trials must be at least 1, got 0"
        );
    }

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(SimulationError::NoArms.is_configuration_error());
        assert!(SimulationError::EpsilonOutOfRange(2.0).is_configuration_error());
        assert!(!SimulationError::AlreadyFinalized.is_configuration_error());
        assert!(!SimulationError::NotFinalized.is_configuration_error());
        assert!(!SimulationError::InvariantViolation("x".to_string()).is_configuration_error());
    }
}
