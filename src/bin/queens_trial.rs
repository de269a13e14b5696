//! Batch trial runner.
//!
//! Runs one engine configuration until it passes or fails the trial
//! criteria, prints a summary, and writes the run log.
//!
//! ## Environment Variables
//!
//! - `QUEENS_N`: Board size (default: 4)
//! - `QUEENS_MUTATION_RATE`: Mutation rate (default: 0.001)
//! - `QUEENS_MAX_EPOCHS`: Epoch budget per run (default: 1000)
//! - `QUEENS_TARGET_SUCCESSES`: Successes needed to pass (default: 50)
//! - `QUEENS_MAX_FAILURES`: Failures before giving up (default: 100)
//! - `QUEENS_SEED`: Base seed for reproducible trials (optional)
//! - `QUEENS_LOG_DIR`: Directory for the run log (default: current directory)

use std::path::PathBuf;
use std::str::FromStr;

use queens_ga::ga::QueensConfig;
use queens_ga::report::{log_file_name, write_log};
use queens_ga::trial::{TrialConfig, TrialRunner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "queens_ga=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = QueensConfig::configure(
        env_or("QUEENS_N", 4),
        env_or("QUEENS_MUTATION_RATE", 0.001),
        env_or("QUEENS_MAX_EPOCHS", 1000),
    )?;

    let mut criteria = TrialConfig::default()
        .with_target_successes(env_or("QUEENS_TARGET_SUCCESSES", 50))
        .with_max_failures(env_or("QUEENS_MAX_FAILURES", 100));
    if let Some(seed) = std::env::var("QUEENS_SEED").ok().and_then(|s| s.parse().ok()) {
        criteria = criteria.with_base_seed(seed);
    }

    let report = TrialRunner::run(&config, &criteria)?;

    println!("Number of successes: {}", report.successes());
    println!("Number of failures: {}", report.failures);
    if !report.passed() {
        println!("Cannot find solution with these params");
    }
    for run in &report.runs {
        println!("run {} with time {} nanoseconds", run.run, run.runtime.as_nanos());
    }

    let dir: PathBuf = std::env::var("QUEENS_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    write_log(dir.join(log_file_name(&config)), &report)?;

    Ok(())
}
