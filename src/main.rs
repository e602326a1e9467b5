use std::process::ExitCode;

use tracing::{ error, info, warn };
use tracing_subscriber::EnvFilter;

use multi_armed_bandits::config::AppConfig;
use multi_armed_bandits::report::{ ConsoleReport, DataFrameReport, ReportSink };
use multi_armed_bandits::{ LabelledSummary, Result, SimulationRunner };

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn report(results: &[LabelledSummary]) -> Result<()> {
    let mut console = ConsoleReport;
    let mut tables = DataFrameReport::new();
    for result in results {
        console.consume(&result.label, &result.summary)?;
        tables.consume(&result.label, &result.summary)?;
    }
    println!("{}", tables.render()?);
    Ok(())
}

fn run(config: &AppConfig) -> Result<()> {
    if config.policy_comparison.enabled {
        info!("Comparing policies on Bernoulli bandits");
        let runner = SimulationRunner::policy_comparison(
            &config.policy_comparison.bandit_probabilities,
            config.policy_comparison.decaying_schedule,
            config.policy_comparison.trials,
            config.seed
        );
        report(&runner.run_all_in_parallel()?)?;
    }

    if config.epsilon_comparison.enabled {
        info!("Comparing exploration rates on Gaussian bandits");
        let seed = config.seed.map(|seed| seed.wrapping_add(runner_offset(config)));
        let runner = SimulationRunner::epsilon_comparison(
            &config.epsilon_comparison.means,
            &config.epsilon_comparison.epsilons,
            config.epsilon_comparison.trials,
            seed
        );
        report(&runner.run_all_in_parallel()?)?;
    }
    Ok(())
}

/// Seeds of the second comparison start after the ones used by the first.
fn runner_offset(config: &AppConfig) -> u64 {
    if config.policy_comparison.enabled { 4 } else { 0 }
}

fn main() -> ExitCode {
    let (config, load_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    init_tracing(&config.log_level);
    if let Some(err) = load_error {
        warn!("{}; falling back to the default configuration", err);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
