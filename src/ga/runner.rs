//! Epoch control loop.
//!
//! [`Evolution`] drives one run epoch by epoch:
//! termination check → fitness scaling → roulette selection → mating
//! (PMX crossover + scheduled mutation) → clear marks → repeat.
//!
//! [`QueensRunner`] wraps it for callers that just want a result.

use super::chromosome::Chromosome;
use super::config::QueensConfig;
use super::fitness::scale_fitness;
use super::operators::{exchange_mutation, pmx_crossover};
use super::population::Population;
use super::schedule::{MutationSchedule, Offspring, RunContext};
use super::selection::roulette_select;
use crate::error::ConfigError;
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Epochs remain and no solution has been seen.
    Running,
    /// A zero-conflict chromosome appeared within the budget.
    Solved,
    /// The epoch budget ran out first.
    Exhausted,
    /// Stopped by the caller before reaching either outcome.
    Cancelled,
}

impl RunState {
    /// Returns `true` once the run can make no further progress.
    pub fn is_terminal(self) -> bool {
        self != RunState::Running
    }
}

/// Result of an N-queens run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensResult {
    /// How the run ended.
    pub state: RunState,

    /// `true` iff `state` is [`RunState::Solved`].
    pub success: bool,

    /// Every zero-conflict placement in the final population, in population
    /// order. Empty unless solved. May contain repeats.
    pub solutions: Vec<Vec<usize>>,

    /// Epochs completed before termination.
    pub epochs: usize,

    /// Final population size.
    pub population_size: usize,

    /// Exchange mutations applied to offspring.
    pub mutation_events: usize,

    /// Offspring produced by crossover.
    pub offspring_produced: usize,

    /// Chromosomes scrambled while seeding.
    pub seed_shuffles: usize,

    /// Placement with the fewest conflicts at termination.
    pub best: Vec<usize>,

    /// Conflict count of `best`.
    pub best_conflicts: usize,

    /// Lowest conflict count seen at each termination check, one entry per
    /// epoch plus the final check.
    pub conflict_history: Vec<usize>,
}

/// A run in progress, advanced one epoch at a time.
///
/// Each call to [`step`](Evolution::step) is a cooperative checkpoint: the
/// caller can inspect the returned state, or [`cancel`](Evolution::cancel),
/// before the next epoch begins.
///
/// ```
/// use queens_ga::ga::{Evolution, QueensConfig, RunState};
/// use queens_ga::random::create_rng;
///
/// let config = QueensConfig::configure(6, 0.01, 500).unwrap();
/// let mut evolution = Evolution::new(config, create_rng(42)).unwrap();
/// while evolution.step() == RunState::Running {}
/// let result = evolution.finish();
/// assert!(result.state.is_terminal());
/// ```
pub struct Evolution<R: Rng> {
    config: QueensConfig,
    rng: R,
    population: Population,
    context: RunContext,
    epoch: usize,
    state: RunState,
    conflict_history: Vec<usize>,
}

impl<R: Rng> Evolution<R> {
    /// Validates `config` and seeds the initial population.
    pub fn new(config: QueensConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let schedule = MutationSchedule::new(config.mutation_interval(), &mut rng);
        let mut context = RunContext::new(schedule);
        let population = Population::seed(
            config.board_size,
            config.start_size,
            (config.min_shuffles, config.max_shuffles),
            &mut rng,
        );
        context.record_seed_shuffles(population.len());

        Ok(Self {
            config,
            rng,
            population,
            context,
            epoch: 0,
            state: RunState::Running,
            conflict_history: Vec::new(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Epochs completed so far.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn config(&self) -> &QueensConfig {
        &self.config
    }

    /// Stops a running evolution. Has no effect once terminal.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Cancelled;
        }
    }

    /// Checks for termination, then runs one epoch if still running.
    ///
    /// Termination is checked first: a solution already in the population
    /// ends the run as [`Solved`](RunState::Solved) even if the budget is
    /// also spent.
    pub fn step(&mut self) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }

        let best = self
            .population
            .conflict_range()
            .map_or(0, |(lowest, _)| lowest);
        self.conflict_history.push(best);

        if self.population.has_solution() {
            self.state = RunState::Solved;
            return self.state;
        }
        if self.epoch >= self.config.max_epochs {
            self.state = RunState::Exhausted;
            return self.state;
        }

        scale_fitness(&mut self.population);
        let selected = roulette_select(
            &mut self.population,
            (self.config.min_select, self.config.max_select),
            &mut self.rng,
        );
        let matings = self.mate();
        self.population.clear_selection();
        self.epoch += 1;

        debug!(
            epoch = self.epoch,
            best_conflicts = best,
            selected,
            matings,
            population = self.population.len(),
            "epoch complete"
        );
        self.state
    }

    /// Steps until a terminal state and returns the result.
    pub fn run(mut self) -> QueensResult {
        while self.step() == RunState::Running {}
        self.finish()
    }

    /// Consumes the run and reports its outcome.
    ///
    /// A run finished while still [`Running`](RunState::Running) is
    /// reported as cancelled.
    pub fn finish(mut self) -> QueensResult {
        self.cancel();

        let solutions = if self.state == RunState::Solved {
            self.population
                .solutions()
                .map(|c| c.genes().to_vec())
                .collect()
        } else {
            Vec::new()
        };
        let (best, best_conflicts) = self
            .population
            .iter()
            .min_by_key(|c| c.conflicts())
            .map(|c| (c.genes().to_vec(), c.conflicts()))
            .unwrap_or_default();

        let result = QueensResult {
            state: self.state,
            success: self.state == RunState::Solved,
            solutions,
            epochs: self.epoch,
            population_size: self.population.len(),
            mutation_events: self.context.mutation_events(),
            offspring_produced: self.context.offspring_produced(),
            seed_shuffles: self.context.seed_shuffles(),
            best,
            best_conflicts,
            conflict_history: self.conflict_history,
        };

        info!(
            state = ?result.state,
            epochs = result.epochs,
            solutions = result.solutions.len(),
            population = result.population_size,
            mutations = result.mutation_events,
            offspring = result.offspring_produced,
            "run finished"
        );
        result
    }

    /// Runs `offspring_per_generation` mating attempts over the currently
    /// selected parents. Returns the number of successful matings.
    fn mate(&mut self) -> usize {
        let eligible = self.population.selected_indices();
        if eligible.is_empty() {
            return 0;
        }

        let mut matings = 0;
        for _ in 0..self.config.offspring_per_generation {
            let a = self.rng.random_range(0..eligible.len());
            if !self.rng.random_bool(self.config.mating_probability) {
                continue;
            }
            if eligible.len() < 2 {
                trace!("single eligible parent, skipping mating");
                continue;
            }
            let mut b = self.rng.random_range(0..eligible.len() - 1);
            if b >= a {
                b += 1;
            }

            let (mut genes1, mut genes2) = {
                let members = self.population.as_slice();
                pmx_crossover(
                    members[eligible[a]].genes(),
                    members[eligible[b]].genes(),
                    &mut self.rng,
                )
            };

            if let Some(which) = self.context.mutation_target() {
                let target = match which {
                    Offspring::First => &mut genes1,
                    Offspring::Second => &mut genes2,
                };
                exchange_mutation(target, 1, &mut self.rng);
                self.context.record_mutation();
                trace!(
                    ordinal = self.context.offspring_produced(),
                    offspring = ?which,
                    "scheduled mutation"
                );
            }

            for genes in [genes1, genes2] {
                let mut child = Chromosome::unevaluated(genes);
                child.evaluate();
                self.population.push(child);
            }
            self.context.record_offspring(2, &mut self.rng);
            matings += 1;
        }
        matings
    }
}

/// Executes N-queens runs.
///
/// # Usage
///
/// ```
/// use queens_ga::ga::{QueensConfig, QueensRunner};
///
/// let config = QueensConfig::configure(4, 0.001, 1000).unwrap().with_seed(42);
/// let result = QueensRunner::run(&config).unwrap();
/// assert_eq!(result.success, !result.solutions.is_empty());
/// ```
pub struct QueensRunner;

impl QueensRunner {
    /// Runs the GA with a generator built from `config.seed` (or a fresh
    /// random seed).
    pub fn run(config: &QueensConfig) -> Result<QueensResult, ConfigError> {
        Self::run_with_cancel(config, None)
    }

    /// Runs the GA with a caller-supplied random source.
    #[instrument(level = "debug", skip_all, fields(board_size = config.board_size, max_epochs = config.max_epochs))]
    pub fn run_with_rng<R: Rng>(
        config: &QueensConfig,
        rng: R,
    ) -> Result<QueensResult, ConfigError> {
        Ok(Evolution::new(config.clone(), rng)?.run())
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next epoch and is reported as
    /// [`Cancelled`](RunState::Cancelled).
    #[instrument(level = "debug", skip_all, fields(board_size = config.board_size, max_epochs = config.max_epochs))]
    pub fn run_with_cancel(
        config: &QueensConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<QueensResult, ConfigError> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut evolution = Evolution::new(config.clone(), rng)?;

        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    evolution.cancel();
                }
            }
            if evolution.step() != RunState::Running {
                break;
            }
        }

        Ok(evolution.finish())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::is_permutation;

    fn config(n: usize, max_epochs: usize, seed: u64) -> QueensConfig {
        QueensConfig::configure(n, 0.01, max_epochs)
            .expect("valid config")
            .with_seed(seed)
    }

    #[test]
    fn test_solves_four_queens() {
        let result = QueensRunner::run(&config(4, 1000, 42)).expect("valid config");
        assert_eq!(result.state, RunState::Solved);
        assert!(result.success);
        assert!(!result.solutions.is_empty());
        for solution in &result.solutions {
            assert_eq!(crate::ga::conflicts::count_diagonal_conflicts(solution), 0);
        }
        assert_eq!(result.best_conflicts, 0);
    }

    #[test]
    fn test_small_boards_exhaust() {
        for n in 2..=3 {
            let result = QueensRunner::run(&config(n, 30, 42)).expect("valid config");
            assert_eq!(result.state, RunState::Exhausted, "n={n}");
            assert!(!result.success);
            assert!(result.solutions.is_empty());
            assert_eq!(result.epochs, 30);
            assert!(result.best_conflicts > 0);
        }
    }

    #[test]
    fn test_single_queen_solved_immediately() {
        let result = QueensRunner::run(&config(1, 10, 42)).expect("valid config");
        assert_eq!(result.state, RunState::Solved);
        assert_eq!(result.epochs, 0);
        assert_eq!(result.population_size, 40);
        assert!(result.solutions.iter().all(|s| s == &vec![0]));
    }

    #[test]
    fn test_zero_budget_checks_initial_population() {
        let result = QueensRunner::run(&config(8, 0, 42)).expect("valid config");
        assert!(result.state.is_terminal());
        assert_eq!(result.epochs, 0);
        assert_eq!(result.conflict_history.len(), 1);
        assert_eq!(result.offspring_produced, 0);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let a = QueensRunner::run(&config(8, 300, 7)).expect("valid config");
        let b = QueensRunner::run(&config(8, 300, 7)).expect("valid config");
        assert_eq!(a, b);
    }

    #[test]
    fn test_population_only_grows_by_pairs() {
        let result = QueensRunner::run(&config(10, 50, 3)).expect("valid config");
        assert!(result.population_size >= 40);
        assert_eq!(result.population_size - 40, result.offspring_produced);
        assert_eq!(result.offspring_produced % 2, 0);
        assert_eq!(result.seed_shuffles, 40);
    }

    #[test]
    fn test_history_one_entry_per_check() {
        let result = QueensRunner::run(&config(3, 25, 42)).expect("valid config");
        assert_eq!(result.conflict_history.len(), result.epochs + 1);
    }

    #[test]
    fn test_step_preserves_permutations() {
        let mut evolution =
            Evolution::new(config(9, 40, 11), create_rng(11)).expect("valid config");
        while evolution.step() == RunState::Running {
            for c in evolution.population() {
                assert!(is_permutation(c.genes()), "invalid genes {:?}", c.genes());
                assert!(!c.is_selected(), "selection marks must be cleared");
                let mut check = c.clone();
                check.evaluate();
                assert_eq!(check.conflicts(), c.conflicts(), "stale conflict count");
            }
        }
    }

    #[test]
    fn test_step_after_terminal_is_stable() {
        let mut evolution =
            Evolution::new(config(2, 3, 1), create_rng(1)).expect("valid config");
        while evolution.step() == RunState::Running {}
        let epochs = evolution.epoch();
        assert_eq!(evolution.step(), RunState::Exhausted);
        assert_eq!(evolution.epoch(), epochs);
    }

    #[test]
    fn test_cancel_via_step() {
        let mut evolution =
            Evolution::new(config(20, 10_000, 5), create_rng(5)).expect("valid config");
        for _ in 0..3 {
            evolution.step();
        }
        evolution.cancel();
        assert_eq!(evolution.step(), RunState::Cancelled);
        let result = evolution.finish();
        assert_eq!(result.state, RunState::Cancelled);
        assert!(!result.success);
        assert!(result.solutions.is_empty());
        assert!(result.epochs <= 3);
    }

    #[test]
    fn test_cancellation_flag() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            QueensRunner::run_with_cancel(&config(20, 10_000, 42), Some(cancel))
                .expect("valid config");
        // flag already set: stopped before the first epoch
        assert_eq!(result.state, RunState::Cancelled);
        assert_eq!(result.epochs, 0);
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let config = QueensConfig::default().with_board_size(0);
        assert_eq!(
            QueensRunner::run(&config).unwrap_err(),
            ConfigError::EmptyBoard
        );
    }

    #[test]
    fn test_mutation_counted_once_per_event() {
        let config = QueensConfig::configure(12, 1.0, 100)
            .expect("valid config")
            .with_seed(9);
        let result = QueensRunner::run(&config).expect("valid config");
        // interval 1: a point is scheduled after every mating event
        assert!(result.mutation_events > 0);
        assert!(result.mutation_events * 2 <= result.offspring_produced + 2);
    }

    #[test]
    fn test_no_mutation_at_zero_rate() {
        let config = QueensConfig::configure(12, 0.0, 100)
            .expect("valid config")
            .with_seed(9);
        let result = QueensRunner::run(&config).expect("valid config");
        assert_eq!(result.mutation_events, 0);
    }

    #[test]
    fn test_no_offspring_without_mating() {
        let config = config(10, 20, 4).with_mating_probability(0.0);
        let result = QueensRunner::run(&config).expect("valid config");
        assert_eq!(result.offspring_produced, 0);
        assert_eq!(result.population_size, 40);
    }

    #[test]
    fn test_run_with_rng() {
        let config = QueensConfig::configure(5, 0.01, 500).expect("valid config");
        let result = QueensRunner::run_with_rng(&config, create_rng(42)).expect("valid config");
        assert!(result.state.is_terminal());
        assert_eq!(result.success, result.state == RunState::Solved);
    }
}
