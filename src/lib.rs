//! Genetic-algorithm solver for the N-queens puzzle.
//!
//! Places N non-attacking queens on an N×N board by evolving a population
//! of permutation-encoded placements:
//!
//! - **Representation**: `genes[row] = column`, always a permutation, so
//!   only diagonal attacks need counting.
//! - **Selection**: Fitness-proportionate roulette wheel over
//!   population-relative fitness.
//! - **Crossover**: Partially Mapped Crossover (PMX).
//! - **Mutation**: Single exchanges placed on a schedule of one per
//!   `1 / mutation_rate` offspring.
//!
//! Around the engine:
//!
//! - [`board`]: Textual rendering and independent solution checks
//! - [`trial`]: Batch trials with pass/fail criteria and timing
//! - [`report`]: Plain-text trial logs
//! - [`random`]: Seeded random sources
//!
//! # Example
//!
//! ```
//! use queens_ga::board::Board;
//! use queens_ga::ga::{QueensConfig, QueensRunner};
//!
//! let config = QueensConfig::configure(6, 0.01, 2000).unwrap().with_seed(1);
//! let result = QueensRunner::run(&config).unwrap();
//! for solution in &result.solutions {
//!     assert!(Board::new(solution).is_valid_solution());
//! }
//! ```

pub mod board;
pub mod error;
pub mod ga;
pub mod random;
pub mod report;
pub mod trial;

pub use error::{ConfigError, ReportError};
