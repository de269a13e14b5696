//! Error types.

/// A rejected engine configuration.
///
/// Returned by [`QueensConfig::validate`](crate::ga::QueensConfig::validate)
/// before any run starts. Conditions met during a run (uniform fitness,
/// a roulette spin that never crosses) are handled inside the engine and
/// never surface as errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board_size must be at least 1")]
    EmptyBoard,
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: usize,
        max: usize,
    },
    #[error("start_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("max_select ({max_select}) exceeds start_size ({start_size})")]
    SelectionExceedsPopulation { max_select: usize, start_size: usize },
}

/// Failure while writing a run log.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}
