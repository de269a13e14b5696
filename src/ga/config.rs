//! Engine configuration.
//!
//! [`QueensConfig`] holds every parameter that controls the evolutionary
//! loop: the board size, the operator rates, and the population and
//! selection sizes.

use crate::error::ConfigError;

/// Configuration for the N-queens genetic algorithm.
///
/// # Defaults
///
/// ```
/// use queens_ga::ga::QueensConfig;
///
/// let config = QueensConfig::default();
/// assert_eq!(config.start_size, 40);
/// assert_eq!(config.max_epochs, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use queens_ga::ga::QueensConfig;
///
/// let config = QueensConfig::configure(8, 0.01, 5000)
///     .unwrap()
///     .with_mating_probability(0.8)
///     .with_selection_range(12, 24)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensConfig {
    /// Board width `n`; one queen per row.
    pub board_size: usize,

    /// Number of chromosomes created at the start of a run.
    ///
    /// The population only grows from here: each mating event appends
    /// two offspring and nothing is ever removed.
    pub start_size: usize,

    /// Epoch budget. The run is exhausted when the epoch counter reaches
    /// this value without a solution.
    pub max_epochs: usize,

    /// Probability that a chosen parent finds a mate (0.0–1.0).
    pub mating_probability: f64,

    /// Expected mutations per offspring (0.0–1.0).
    ///
    /// One offspring in every `round(1 / mutation_rate)` receives a single
    /// swap. Zero disables mutation.
    pub mutation_rate: f64,

    /// Fewest parents marked by roulette selection per epoch.
    pub min_select: usize,

    /// Most parents marked by roulette selection per epoch.
    pub max_select: usize,

    /// Mating attempts per epoch. Each successful attempt yields two
    /// offspring.
    pub offspring_per_generation: usize,

    /// Fewest swaps used to scramble an initial chromosome.
    pub min_shuffles: usize,

    /// Most swaps used to scramble an initial chromosome.
    pub max_shuffles: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed for every run.
    pub seed: Option<u64>,
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            start_size: 40,
            max_epochs: 1000,
            mating_probability: 0.7,
            mutation_rate: 0.001,
            min_select: 10,
            max_select: 30,
            offspring_per_generation: 20,
            min_shuffles: 8,
            max_shuffles: 20,
            seed: None,
        }
    }
}

impl QueensConfig {
    /// Sets the board size and the two tuned parameters, keeping the fixed
    /// defaults for everything else, and validates the result.
    pub fn configure(
        board_size: usize,
        mutation_rate: f64,
        max_epochs: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            board_size,
            mutation_rate,
            max_epochs,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the board size.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Sets the starting population size.
    pub fn with_start_size(mut self, n: usize) -> Self {
        self.start_size = n;
        self
    }

    /// Sets the epoch budget.
    pub fn with_max_epochs(mut self, n: usize) -> Self {
        self.max_epochs = n;
        self
    }

    /// Sets the mating probability.
    pub fn with_mating_probability(mut self, p: f64) -> Self {
        self.mating_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the inclusive range for the number of parents selected per
    /// epoch.
    pub fn with_selection_range(mut self, min: usize, max: usize) -> Self {
        self.min_select = min;
        self.max_select = max;
        self
    }

    /// Sets the number of mating attempts per epoch.
    pub fn with_offspring_per_generation(mut self, n: usize) -> Self {
        self.offspring_per_generation = n;
        self
    }

    /// Sets the inclusive range of initial scrambling swaps.
    pub fn with_shuffle_range(mut self, min: usize, max: usize) -> Self {
        self.min_shuffles = min;
        self.max_shuffles = max;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Offspring between scheduled mutations: `round(1 / mutation_rate)`.
    ///
    /// `None` when the rate is zero.
    pub fn mutation_interval(&self) -> Option<usize> {
        if self.mutation_rate <= 0.0 {
            return None;
        }
        Some(((1.0 / self.mutation_rate).round() as usize).max(1))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("mating_probability", self.mating_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.min_select > self.max_select {
            return Err(ConfigError::InvertedRange {
                name: "select",
                min: self.min_select,
                max: self.max_select,
            });
        }
        if self.min_shuffles > self.max_shuffles {
            return Err(ConfigError::InvertedRange {
                name: "shuffles",
                min: self.min_shuffles,
                max: self.max_shuffles,
            });
        }
        if self.start_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.start_size));
        }
        if self.max_select > self.start_size {
            return Err(ConfigError::SelectionExceedsPopulation {
                max_select: self.max_select,
                start_size: self.start_size,
            });
        }
        Ok(())
    }
}
