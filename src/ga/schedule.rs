//! Mutation scheduling and per-run counters.
//!
//! Mutation is not rolled per offspring. Instead, offspring are numbered in
//! the order they are produced, and one ordinal in every window of
//! `interval` offspring is scheduled to receive a single exchange. The
//! schedule and the counters it reads live in a [`RunContext`] owned by one
//! run, so independent runs never share state.

use rand::Rng;

/// Which offspring of a mating event the schedule hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offspring {
    First,
    Second,
}

/// Picks which offspring ordinals receive a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSchedule {
    interval: Option<usize>,
    next: Option<usize>,
}

impl MutationSchedule {
    /// Creates a schedule with one mutation per `interval` offspring.
    ///
    /// The first mutation lands on an ordinal drawn uniformly from
    /// `[0, interval]`. `None` disables mutation entirely.
    pub fn new<R: Rng>(interval: Option<usize>, rng: &mut R) -> Self {
        let next = interval.map(|i| rng.random_range(0..=i));
        Self { interval, next }
    }

    /// The ordinal scheduled for the next mutation, if any.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Offspring between window boundaries.
    pub fn interval(&self) -> Option<usize> {
        self.interval
    }

    /// Reports whether either offspring of a mating event is scheduled.
    ///
    /// The event's offspring carry ordinals `first` and `first + 1`. The
    /// first offspring wins if both could match.
    pub fn target(&self, first: usize) -> Option<Offspring> {
        match self.next? {
            n if n == first => Some(Offspring::First),
            n if n == first + 1 => Some(Offspring::Second),
            _ => None,
        }
    }

    /// Re-chooses the next mutation when the offspring count moves from
    /// `before` to `after` across a multiple of the interval.
    ///
    /// The new ordinal is `after + gap`, `gap` uniform in `[0, interval]`.
    /// Returns `true` if the schedule moved.
    pub fn advance<R: Rng>(&mut self, before: usize, after: usize, rng: &mut R) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if before / interval == after / interval {
            return false;
        }
        self.next = Some(after + rng.random_range(0..=interval));
        true
    }
}

/// Counters and schedule for a single run.
///
/// Seeding randomization and steady-state mutation are tallied separately:
/// `seed_shuffles` counts chromosomes scrambled at population creation,
/// `mutation_events` counts exchange mutations applied to offspring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    offspring_produced: usize,
    mutation_events: usize,
    seed_shuffles: usize,
    schedule: MutationSchedule,
}

impl RunContext {
    /// Creates a context with zeroed counters.
    pub fn new(schedule: MutationSchedule) -> Self {
        Self {
            offspring_produced: 0,
            mutation_events: 0,
            seed_shuffles: 0,
            schedule,
        }
    }

    /// Offspring produced so far in this run.
    pub fn offspring_produced(&self) -> usize {
        self.offspring_produced
    }

    /// Exchange mutations applied to offspring so far.
    pub fn mutation_events(&self) -> usize {
        self.mutation_events
    }

    /// Chromosomes scrambled while seeding the population.
    pub fn seed_shuffles(&self) -> usize {
        self.seed_shuffles
    }

    pub fn schedule(&self) -> &MutationSchedule {
        &self.schedule
    }

    /// Which offspring of the next mating event should mutate.
    pub fn mutation_target(&self) -> Option<Offspring> {
        self.schedule.target(self.offspring_produced)
    }

    pub(crate) fn record_seed_shuffles(&mut self, count: usize) {
        self.seed_shuffles += count;
    }

    pub(crate) fn record_mutation(&mut self) {
        self.mutation_events += 1;
    }

    /// Counts `count` new offspring and advances the schedule.
    pub(crate) fn record_offspring<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let before = self.offspring_produced;
        self.offspring_produced += count;
        self.schedule.advance(before, self.offspring_produced, rng);
    }
}
