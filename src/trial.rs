//! Batch trials: run one configuration repeatedly and collect statistics.
//!
//! A trial keeps starting fresh runs until it has either enough successes
//! to pass or enough failures to give up. Each run is timed from the
//! outside, around the engine call.

use crate::error::ConfigError;
use crate::ga::{QueensConfig, QueensRunner};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Pass/fail criteria for a batch trial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    /// Successful runs required to pass.
    pub target_successes: usize,

    /// Failed runs after which the trial gives up.
    pub max_failures: usize,

    /// Seed for the first run; run `k` uses `base_seed + k`.
    ///
    /// `None` gives every run a fresh random seed.
    pub base_seed: Option<u64>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            target_successes: 50,
            max_failures: 100,
            base_seed: None,
        }
    }
}

impl TrialConfig {
    pub fn with_target_successes(mut self, n: usize) -> Self {
        self.target_successes = n;
        self
    }

    pub fn with_max_failures(mut self, n: usize) -> Self {
        self.max_failures = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }
}

/// One successful run within a trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuccessfulRun {
    /// 1-based index among the successful runs.
    pub run: usize,

    /// Wall-clock time spent inside the engine.
    pub runtime: Duration,

    /// Epoch at which the solution was found.
    pub epochs: usize,

    /// Population size when the run ended.
    pub population_size: usize,

    /// Every solution the run reported.
    pub solutions: Vec<Vec<usize>>,
}

/// Outcome of a batch trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialReport {
    /// Engine configuration shared by every run (seed excluded).
    pub config: QueensConfig,

    /// Criteria the trial ran under.
    pub criteria: TrialConfig,

    /// Successful runs in completion order.
    pub runs: Vec<SuccessfulRun>,

    /// Runs that exhausted their epoch budget.
    pub failures: usize,

    /// Wall-clock time for the whole trial.
    pub elapsed: Duration,
}

impl TrialReport {
    /// Number of successful runs.
    pub fn successes(&self) -> usize {
        self.runs.len()
    }

    /// Total runs attempted.
    pub fn attempts(&self) -> usize {
        self.runs.len() + self.failures
    }

    /// Returns `true` if the success target was met.
    pub fn passed(&self) -> bool {
        self.successes() >= self.criteria.target_successes
    }

    /// Mean engine time over successful runs, or `None` if there were none.
    pub fn mean_runtime(&self) -> Option<Duration> {
        let count = u32::try_from(self.runs.len()).ok().filter(|&c| c > 0)?;
        let total: Duration = self.runs.iter().map(|r| r.runtime).sum();
        Some(total / count)
    }
}

/// Runs batch trials.
pub struct TrialRunner;

impl TrialRunner {
    /// Runs `config` until `criteria` decides pass or fail.
    ///
    /// The configuration is validated once, before the first run.
    #[instrument(level = "info", skip_all, fields(board_size = config.board_size, mutation_rate = config.mutation_rate, max_epochs = config.max_epochs))]
    pub fn run(config: &QueensConfig, criteria: &TrialConfig) -> Result<TrialReport, ConfigError> {
        config.validate()?;

        let started = Instant::now();
        let mut runs = Vec::new();
        let mut failures = 0;
        let mut attempt: u64 = 0;

        while runs.len() < criteria.target_successes && failures < criteria.max_failures {
            let run_config = QueensConfig {
                seed: criteria.base_seed.map(|s| s.wrapping_add(attempt)),
                ..config.clone()
            };
            attempt += 1;

            let run_started = Instant::now();
            let result = QueensRunner::run(&run_config)?;
            let runtime = run_started.elapsed();

            if result.success {
                debug!(
                    run = runs.len() + 1,
                    epochs = result.epochs,
                    runtime_ns = runtime.as_nanos() as u64,
                    "run succeeded"
                );
                runs.push(SuccessfulRun {
                    run: runs.len() + 1,
                    runtime,
                    epochs: result.epochs,
                    population_size: result.population_size,
                    solutions: result.solutions,
                });
            } else {
                failures += 1;
                debug!(failures, epochs = result.epochs, "run failed");
            }
        }

        let report = TrialReport {
            config: QueensConfig {
                seed: None,
                ..config.clone()
            },
            criteria: criteria.clone(),
            runs,
            failures,
            elapsed: started.elapsed(),
        };

        info!(
            successes = report.successes(),
            failures = report.failures,
            passed = report.passed(),
            "trial finished"
        );
        Ok(report)
    }
}
