//! Plain-text run logs for batch trials.
//!
//! A log lists the engine parameters, then one block per successful run
//! with every solution drawn as a board, then a runtime summary.

use crate::board::Board;
use crate::error::ReportError;
use crate::ga::QueensConfig;
use crate::trial::TrialReport;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use tracing::info;

/// Conventional log file name: `GA-N{n}-{mutation_rate}-{max_epochs}.txt`.
///
/// ```
/// use queens_ga::ga::QueensConfig;
/// use queens_ga::report::log_file_name;
///
/// let config = QueensConfig::configure(8, 0.005, 5000).unwrap();
/// assert_eq!(log_file_name(&config), "GA-N8-0.005-5000.txt");
/// ```
pub fn log_file_name(config: &QueensConfig) -> String {
    format!(
        "GA-N{}-{}-{}.txt",
        config.board_size, config.mutation_rate, config.max_epochs
    )
}

/// Renders the parameter block.
pub fn write_parameters(out: &mut impl fmt::Write, config: &QueensConfig) -> fmt::Result {
    writeln!(out, "Genetic Algorithm")?;
    writeln!(out, "Parameters")?;
    writeln!(out, "MAX_LENGTH/N: {}", config.board_size)?;
    writeln!(out, "STARTING_POPULATION: {}", config.start_size)?;
    writeln!(out, "MAX_EPOCHS: {}", config.max_epochs)?;
    writeln!(out, "MATING_PROBABILITY: {}", config.mating_probability)?;
    writeln!(out, "MUTATION_RATE: {}", config.mutation_rate)?;
    writeln!(out, "MIN_SELECTED_PARENTS: {}", config.min_select)?;
    writeln!(out, "MAX_SELECTED_PARENTS: {}", config.max_select)?;
    writeln!(out, "OFFSPRING_PER_GENERATION: {}", config.offspring_per_generation)?;
    writeln!(out, "MINIMUM_SHUFFLES: {}", config.min_shuffles)?;
    writeln!(out, "MAXIMUM_SHUFFLES: {}", config.max_shuffles)?;
    writeln!(out)
}

/// Renders a full trial log.
pub fn render_log(report: &TrialReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_parameters(&mut out, &report.config)?;

    for run in &report.runs {
        writeln!(out, "Run: {}", run.run)?;
        writeln!(out, "Runtime in nanoseconds: {}", run.runtime.as_nanos())?;
        writeln!(out, "Found at epoch: {}", run.epochs)?;
        writeln!(out, "Population size: {}", run.population_size)?;
        writeln!(out)?;
        for solution in &run.solutions {
            write!(out, "{}", Board::new(solution))?;
            writeln!(out)?;
        }
    }

    writeln!(out, "Runtime summary")?;
    writeln!(out)?;
    for run in &report.runs {
        writeln!(out, "{}", run.runtime.as_nanos())?;
    }
    writeln!(out, "Successes: {}", report.successes())?;
    writeln!(out, "Failures: {}", report.failures)?;
    writeln!(out, "Total elapsed in nanoseconds: {}", report.elapsed.as_nanos())?;
    Ok(out)
}

/// Writes the trial log to `path`.
pub fn write_log(path: impl AsRef<Path>, report: &TrialReport) -> Result<(), ReportError> {
    let path = path.as_ref();
    let text = render_log(report)?;
    fs::write(path, text)?;
    info!(path = %path.display(), runs = report.runs.len(), "wrote trial log");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::{SuccessfulRun, TrialConfig};
    use std::time::Duration;

    fn sample_report() -> TrialReport {
        TrialReport {
            config: QueensConfig::configure(4, 0.001, 1000).expect("valid config"),
            criteria: TrialConfig::default(),
            runs: vec![SuccessfulRun {
                run: 1,
                runtime: Duration::from_nanos(1500),
                epochs: 3,
                population_size: 68,
                solutions: vec![vec![1, 3, 0, 2]],
            }],
            failures: 2,
            elapsed: Duration::from_nanos(9000),
        }
    }

    #[test]
    fn test_log_file_name() {
        let config = QueensConfig::configure(4, 0.001, 1000).expect("valid config");
        assert_eq!(log_file_name(&config), "GA-N4-0.001-1000.txt");
    }

    #[test]
    fn test_parameter_block() {
        let mut out = String::new();
        write_parameters(&mut out, &QueensConfig::default()).expect("string write");
        assert!(out.starts_with("Genetic Algorithm\nParameters\n"));
        assert!(out.contains("STARTING_POPULATION: 40\n"));
        assert!(out.contains("MATING_PROBABILITY: 0.7\n"));
        assert!(out.contains("MAXIMUM_SHUFFLES: 20\n"));
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn test_render_log_sections() {
        let text = render_log(&sample_report()).expect("string write");
        assert!(text.contains("Run: 1\nRuntime in nanoseconds: 1500\nFound at epoch: 3\nPopulation size: 68\n"));
        assert!(text.contains(". Q . .\n. . . Q\nQ . . .\n. . Q .\n"));
        assert!(text.contains("Runtime summary\n\n1500\n"));
        assert!(text.contains("Failures: 2\n"));
        assert!(text.ends_with("Total elapsed in nanoseconds: 9000\n"));
    }

    #[test]
    fn test_write_log_round_trip() {
        let dir = std::env::temp_dir().join(format!("queens-ga-report-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("log.txt");

        let report = sample_report();
        write_log(&path, &report).expect("write log");
        let written = fs::read_to_string(&path).expect("read log");
        assert_eq!(written, render_log(&report).expect("string write"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_log_missing_dir() {
        let path = std::env::temp_dir()
            .join("queens-ga-no-such-dir")
            .join("nested")
            .join("log.txt");
        assert!(matches!(
            write_log(&path, &sample_report()),
            Err(ReportError::Io(_))
        ));
    }
}
