//! Genetic algorithm for the N-queens puzzle.
//!
//! Candidates are permutations: `genes[row]` is the column of the queen in
//! that row, which rules out row and column clashes by construction. The
//! engine evolves a growing population until a zero-conflict placement
//! appears or the epoch budget runs out.
//!
//! # Key Types
//!
//! - [`QueensConfig`]: Board size, operator rates, population and selection sizes
//! - [`Evolution`]: A run in progress, stepped one epoch at a time
//! - [`QueensRunner`]: Runs to completion and returns a [`QueensResult`]
//! - [`Chromosome`], [`Population`]: Candidate placements and their container
//!
//! # Submodules
//!
//! - [`operators`]: PMX crossover, exchange mutation, seeding scramble
//! - [`conflicts`]: Diagonal conflict counting
//! - [`fitness`]: Population-relative fitness scaling
//! - [`selection`]: Roulette wheel parent selection
//! - [`schedule`]: Mutation schedule and per-run counters
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

mod chromosome;
mod config;
pub mod conflicts;
pub mod fitness;
pub mod operators;
mod population;
mod runner;
pub mod schedule;
pub mod selection;

pub use chromosome::{is_permutation, Chromosome};
pub use config::QueensConfig;
pub use population::{min_max_by_key, Population};
pub use runner::{Evolution, QueensResult, QueensRunner, RunState};
