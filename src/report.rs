//! Report sinks. They receive finished summaries and present them; nothing in
//! here feeds back into a simulation.

use chrono::{ DateTime, Local };
use polars::prelude::*;
use tracing::info;

use crate::errors::Result;
use crate::statistics::ExperimentSummary;

pub trait ReportSink {
    fn consume(&mut self, label: &str, summary: &ExperimentSummary) -> Result<()>;
}

/// Logs the headline numbers of every experiment through `tracing`.
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ReportSink for ConsoleReport {
    fn consume(&mut self, label: &str, summary: &ExperimentSummary) -> Result<()> {
        info!("### Results for {} ###", label);
        for (index, arm) in summary.arms.iter().enumerate() {
            info!(
                "Bandit: {} \t p: {} \t Mean estimate: {:.4} \t Pulls: {}",
                index,
                arm.true_mean,
                arm.estimate,
                arm.pull_count
            );
        }
        info!("Total reward earned: {}", summary.total_reward);
        info!("Overall win rate: {:.4}", summary.win_rate);
        if let Some(explored) = summary.exploration_count {
            info!("Number of times explored: {}", explored);
        }
        if let Some(exploited) = summary.exploitation_count {
            info!("Number of times exploited: {}", exploited);
        }
        info!("Number of times selected optimal bandit: {}", summary.optimal_count);
        info!("Percent suboptimal: {:.4}", summary.suboptimal_fraction);
        Ok(())
    }
}

/// Collects summaries into polars tables, one per experiment plus one row per
/// experiment in a comparison table.
#[derive(Debug, Default)]
pub struct DataFrameReport {
    per_experiment: Vec<(String, DataFrame)>,
    labels: Vec<String>,
    total_rewards: Vec<f64>,
    win_rates: Vec<f64>,
    suboptimal_fractions: Vec<f64>,
    learning_errors: Vec<f64>,
    explored: Vec<Option<u64>>,
    exploited: Vec<Option<u64>>,
}

impl DataFrameReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn experiment_tables(&self) -> &[(String, DataFrame)] {
        &self.per_experiment
    }

    /// One row per consumed experiment, in the order they were consumed.
    pub fn comparison_table(&self) -> Result<DataFrame> {
        let labels: Vec<&str> = self.labels
            .iter()
            .map(String::as_str)
            .collect();
        let df = DataFrame::new(
            vec![
                Series::new("policy", labels),
                Series::new("total_reward", &self.total_rewards),
                Series::new("win_rate", &self.win_rates),
                Series::new("suboptimal_fraction", &self.suboptimal_fractions),
                Series::new("learning_error", &self.learning_errors),
                Series::new("explored", &self.explored),
                Series::new("exploited", &self.exploited)
            ]
        )?;
        Ok(df)
    }

    /// Every table as text, stamped with the time it was rendered.
    pub fn render(&self) -> Result<String> {
        let local: DateTime<Local> = Local::now();
        let mut lines = vec![
            format!("### Bandit simulation report ({}) ###", local.format("%Y-%m-%d %H:%M:%S"))
        ];
        for (label, df) in &self.per_experiment {
            lines.push(format!("### Results for {} ###", label));
            lines.push(format!("{}\n", df));
        }
        lines.push("### Comparison of all experiments ###".to_string());
        lines.push(format!("{}", self.comparison_table()?));
        Ok(lines.join("\n"))
    }
}

/// Per arm table: what was true, what was learned and how often each arm was
/// played, best arm first.
pub fn arm_table(summary: &ExperimentSummary) -> Result<DataFrame> {
    let num_of_arms = summary.arms.len();
    let true_means: Vec<f64> = summary.arms
        .iter()
        .map(|arm| arm.true_mean)
        .collect();
    let estimates: Vec<f64> = summary.arms
        .iter()
        .map(|arm| arm.estimate)
        .collect();
    let pull_counts: Vec<u64> = summary.arms
        .iter()
        .map(|arm| arm.pull_count)
        .collect();

    let mut df = DataFrame::new(
        vec![
            Series::new("bandit", Vec::from_iter(0..num_of_arms as u32)),
            Series::new("true_mean", &true_means),
            Series::new("estimate", &estimates),
            Series::new("pulls", &pull_counts),
            Series::new("selected", &summary.selection_frequency)
        ]
    )?;

    let num_of_trials = summary.num_of_trials().max(1) as f64;
    df = df
        .lazy()
        .with_column((col("true_mean") - col("estimate")).alias("estimate_error"))
        .with_column(
            (col("selected").cast(DataType::Float64) / lit(num_of_trials)).alias("pull_share")
        )
        .collect()?;

    df = df.sort(["true_mean"], true)?;
    Ok(df)
}

impl ReportSink for DataFrameReport {
    fn consume(&mut self, label: &str, summary: &ExperimentSummary) -> Result<()> {
        let df = arm_table(summary)?;
        self.per_experiment.push((label.to_string(), df));
        self.labels.push(label.to_string());
        self.total_rewards.push(summary.total_reward);
        self.win_rates.push(summary.win_rate);
        self.suboptimal_fractions.push(summary.suboptimal_fraction);
        self.learning_errors.push(summary.learning_error);
        self.explored.push(summary.exploration_count);
        self.exploited.push(summary.exploitation_count);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arm::ArmSnapshot;
    use crate::statistics::{ summarize, TrialCounters };

    fn summary() -> ExperimentSummary {
        let arms = vec![
            ArmSnapshot { true_mean: 0.2, estimate: 0.0, pull_count: 1 },
            ArmSnapshot { true_mean: 0.75, estimate: 2.0 / 3.0, pull_count: 3 }
        ];
        let counters = TrialCounters { exploration: Some(1), exploitation: Some(3), suboptimal: 1 };
        summarize(&[0.0, 1.0, 1.0, 0.0], &[0, 1, 1, 1], &arms, counters)
    }

    #[test]
    fn test_arm_table_has_a_row_per_arm_sorted_by_true_mean() {
        let df = arm_table(&summary()).unwrap();

        assert_eq!(df.shape().0, 2);
        let bandits: Vec<Option<u32>> = df
            .column("bandit")
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(bandits, vec![Some(1), Some(0)]);

        let shares: Vec<Option<f64>> = df
            .column("pull_share")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(shares, vec![Some(0.75), Some(0.25)]);
    }

    #[test]
    fn test_comparison_table_has_a_row_per_experiment() {
        let mut report = DataFrameReport::new();
        report.consume("first", &summary()).unwrap();
        report.consume("second", &summary()).unwrap();

        let df = report.comparison_table().unwrap();
        assert_eq!(df.shape(), (2, 7));
        assert_eq!(report.experiment_tables().len(), 2);
    }

    #[test]
    fn test_render_contains_every_experiment() {
        let mut report = DataFrameReport::new();
        report.consume("ucb1", &summary()).unwrap();

        let text = report.render().unwrap();
        assert!(text.contains("### Results for ucb1 ###"));
        assert!(text.contains("### Comparison of all experiments ###"));
    }

    #[test]
    fn test_console_report_accepts_summaries() {
        let mut report = ConsoleReport;
        assert!(report.consume("epsilon_greedy", &summary()).is_ok());
    }
}
