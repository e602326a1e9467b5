//! Multi armed bandit simulations: reward environments, action selection
//! policies, experiments that play them against each other and reports over
//! the results.

pub mod arm;
pub mod config;
pub mod constants;
pub mod environments;
pub mod errors;
pub mod estimator;
pub mod experiment;
pub mod policies;
pub mod report;
pub mod simulation_runner;
pub mod statistics;

pub use errors::{ Result, SimulationError };
pub use experiment::{ Experiment, ExperimentConfig, Phase };
pub use policies::Policy;
pub use simulation_runner::{ LabelledSummary, SimulationRunner };
