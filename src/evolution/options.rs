//! # Nsga2Options
//!
//! The `Nsga2Options` struct holds the configuration of an NSGA-II run:
//! population size, generation count, variation probabilities, tournament
//! size, execution mode and an optional run seed.
//!
//! ## Example
//!
//! ```rust
//! use rebalance::evolution::options::Nsga2Options;
//!
//! // Create a new Nsga2Options instance with custom parameters
//! let options = Nsga2Options::new(100, 250, 0.9, 0.1, 2, false);
//! assert!(options.validate().is_ok());
//!
//! // Create a new Nsga2Options instance with default parameters
//! let defaults = Nsga2Options::default();
//! assert_eq!(defaults.get_population_size(), 400);
//! assert_eq!(defaults.get_num_generations(), 1000);
//! ```
//!
//! ## Fields
//!
//! - `population_size`: The number of individuals kept after every generation.
//! - `num_generations`: The fixed number of generations. There is no early stop.
//! - `crossover_probability`: Probability that a parent pair is recombined.
//! - `mutation_probability`: Per-gene mutation probability.
//! - `tournament_size`: Contestants per selection tournament, at least 2.
//! - `parallel`: Evaluate and breed on the rayon thread pool.
//! - `seed`: Run seed. When absent a seed is drawn from system entropy.
//! - `log_level`: How much per-generation progress is reported through `tracing`.
//!
//! ## `LogLevel`
//!
//! - `Verbose`: Per-generation summaries plus the first front's objective points.
//! - `Minimal`: Start, completion and per-generation summaries.
//! - `None`: Only warnings and errors.

use crate::error::{OptimizerError, Result};

pub const DEFAULT_POPULATION_SIZE: usize = 400;
pub const DEFAULT_NUM_GENERATIONS: usize = 1000;
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.90;
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.30;
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Progress reporting granularity of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    #[default]
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Nsga2Options {
    population_size: usize,
    num_generations: usize,
    crossover_probability: f64,
    mutation_probability: f64,
    tournament_size: usize,
    parallel: bool,
    seed: Option<u64>,
    log_level: LogLevel,
}

impl Nsga2Options {
    /// Creates a new `Nsga2Options` instance without a fixed seed.
    ///
    /// # Arguments
    ///
    /// * `population_size` - The size of the population in each generation.
    /// * `num_generations` - The number of generations to run.
    /// * `crossover_probability` - Probability of recombining a parent pair.
    /// * `mutation_probability` - Per-gene mutation probability.
    /// * `tournament_size` - The number of contestants per tournament.
    /// * `parallel` - Whether to use the rayon thread pool.
    pub fn new(
        population_size: usize,
        num_generations: usize,
        crossover_probability: f64,
        mutation_probability: f64,
        tournament_size: usize,
        parallel: bool,
    ) -> Self {
        Self {
            population_size,
            num_generations,
            crossover_probability,
            mutation_probability,
            tournament_size,
            parallel,
            seed: None,
            log_level: LogLevel::default(),
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the crossover probability.
    pub fn set_crossover_probability(&mut self, probability: f64) {
        self.crossover_probability = probability;
    }

    /// Sets the per-gene mutation probability.
    pub fn set_mutation_probability(&mut self, probability: f64) {
        self.mutation_probability = probability;
    }

    /// Sets the tournament size.
    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    /// Switches between parallel and sequential execution.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Fixes the run seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Sets the progress reporting granularity.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Checks that the options describe a runnable configuration.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::Configuration` when the population size or the
    /// tournament size is below 2, or when a probability lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(OptimizerError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.tournament_size < 2 {
            return Err(OptimizerError::Configuration(format!(
                "Tournament size must be at least 2, got {}",
                self.tournament_size
            )));
        }
        for (name, value) in [
            ("Crossover", self.crossover_probability),
            ("Mutation", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(OptimizerError::Configuration(format!(
                    "{} probability must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Returns a builder for creating an `Nsga2Options` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rebalance::evolution::options::Nsga2Options;
    ///
    /// let options = Nsga2Options::builder()
    ///     .population_size(50)
    ///     .num_generations(20)
    ///     .mutation_probability(0.1)
    ///     .parallel(false)
    ///     .seed(42)
    ///     .build();
    ///
    /// assert_eq!(options.get_population_size(), 50);
    /// assert_eq!(options.get_crossover_probability(), 0.9);
    /// assert_eq!(options.get_seed(), Some(42));
    /// ```
    pub fn builder() -> Nsga2OptionsBuilder {
        Nsga2OptionsBuilder::default()
    }
}

impl Default for Nsga2Options {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            num_generations: DEFAULT_NUM_GENERATIONS,
            crossover_probability: DEFAULT_CROSSOVER_PROBABILITY,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            parallel: true,
            seed: None,
            log_level: LogLevel::default(),
        }
    }
}

/// Builder for `Nsga2Options`.
///
/// Provides a fluent interface for constructing `Nsga2Options` instances.
/// Unset fields take their default values.
#[derive(Debug, Clone, Default)]
pub struct Nsga2OptionsBuilder {
    population_size: Option<usize>,
    num_generations: Option<usize>,
    crossover_probability: Option<f64>,
    mutation_probability: Option<f64>,
    tournament_size: Option<usize>,
    parallel: Option<bool>,
    seed: Option<u64>,
    log_level: Option<LogLevel>,
}

impl Nsga2OptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the crossover probability.
    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    /// Sets the tournament size.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the execution mode.
    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = Some(value);
        self
    }

    /// Fixes the run seed.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Sets the progress reporting granularity.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `Nsga2Options` instance.
    pub fn build(self) -> Nsga2Options {
        Nsga2Options {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            num_generations: self.num_generations.unwrap_or(DEFAULT_NUM_GENERATIONS),
            crossover_probability: self
                .crossover_probability
                .unwrap_or(DEFAULT_CROSSOVER_PROBABILITY),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(DEFAULT_MUTATION_PROBABILITY),
            tournament_size: self.tournament_size.unwrap_or(DEFAULT_TOURNAMENT_SIZE),
            parallel: self.parallel.unwrap_or(true),
            seed: self.seed,
            log_level: self.log_level.unwrap_or_default(),
        }
    }
}
