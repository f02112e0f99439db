use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::individual::{Individual, Population};
use super::options::{LogLevel, Nsga2Options};
use crate::error::{OptimizerError, Result};
use crate::pareto::{crowding_distance, into_fronts};
use crate::problem::Problem;
use crate::rng::RandomNumberGenerator;
use crate::selection::TournamentSelection;
use crate::solution::{ObjectivePoint, Solution};

/// The NSGA-II generational loop.
///
/// Every generation breeds `N` offspring from the current population through
/// crowded tournament selection, constraint-aware crossover and mutation,
/// merges them with the parents and keeps the best `N` by front rank and
/// crowding distance.
///
/// Randomness is derived per task from the run seed, the generation and the
/// pair index, so a fixed seed yields the same final population in parallel
/// and sequential mode.
#[derive(Debug)]
pub struct Nsga2<P: Problem> {
    problem: P,
    options: Nsga2Options,
    selection: TournamentSelection,
}

impl<P: Problem> Nsga2<P> {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `problem` - The problem to optimize.
    /// * `options` - Run parameters.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::Configuration` if the options are invalid or the
    /// problem declares no objectives.
    pub fn new(problem: P, options: Nsga2Options) -> Result<Self> {
        options.validate()?;
        if problem.num_objectives() == 0 {
            return Err(OptimizerError::Configuration(format!(
                "Problem '{}' declares no objectives",
                problem.name()
            )));
        }
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        Ok(Self {
            problem,
            options,
            selection,
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn options(&self) -> &Nsga2Options {
        &self.options
    }

    /// Runs the configured number of generations and returns the final population.
    ///
    /// # Returns
    ///
    /// Exactly `population_size` individuals with rank and crowding distance
    /// assigned. With zero generations this is the sorted initial population.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::Initialization` if the problem's initializer
    /// does not produce exactly `population_size` solutions.
    ///
    /// # Performance
    ///
    /// In parallel mode both evaluation of the initial population and breeding
    /// of offspring pairs run on the rayon thread pool.
    pub fn run(&self) -> Result<Population<P::Solution>> {
        let seed = self
            .options
            .get_seed()
            .unwrap_or_else(|| RandomNumberGenerator::new().next_seed());
        let population_size = self.options.get_population_size();
        let num_generations = self.options.get_num_generations();
        let log_level = self.options.get_log_level();
        let started = Instant::now();

        if log_level != LogLevel::None {
            info!(
                problem = self.problem.name(),
                population_size,
                num_generations,
                parallel = self.options.is_parallel(),
                seed,
                "Starting NSGA-II"
            );
        }

        let mut init_rng = RandomNumberGenerator::for_task(seed, 0, 0);
        let solutions = self.problem.initialize(population_size, &mut init_rng);
        if solutions.len() != population_size {
            return Err(OptimizerError::Initialization {
                expected: population_size,
                actual: solutions.len(),
            });
        }

        let initial = self.evaluate_all(solutions);
        let mut population = environmental_selection(initial, population_size);
        self.problem.end_generation();

        for generation in 0..num_generations {
            let offspring = self.breed(&population, generation, seed)?;
            self.problem.end_generation();

            let mut merged = population;
            merged.extend(offspring);
            population = environmental_selection(merged, population_size);

            self.log_generation(generation, &population);
        }

        if log_level != LogLevel::None {
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                first_front = first_front_size(&population),
                infeasible = infeasible_count(&population),
                "NSGA-II completed"
            );
        }

        Ok(population)
    }

    /// Objective points of the first front of `population`, re-evaluated
    /// against the problem's current state.
    pub fn pareto_front(&self, population: &[Individual<P::Solution>]) -> Vec<ObjectivePoint> {
        crate::pareto::pareto_front(population, &self.problem)
    }

    fn evaluate_all(&self, solutions: Vec<P::Solution>) -> Population<P::Solution> {
        let evaluate = |solution: P::Solution| {
            let objectives = self.problem.evaluate(&solution);
            Individual::new(solution, objectives)
        };
        if self.options.is_parallel() {
            solutions.into_par_iter().map(evaluate).collect()
        } else {
            solutions.into_iter().map(evaluate).collect()
        }
    }

    /// Produces `population_size` evaluated offspring.
    ///
    /// `ceil(N / 2)` pairs are bred; for odd `N` the surplus child is dropped.
    fn breed(
        &self,
        population: &[Individual<P::Solution>],
        generation: usize,
        seed: u64,
    ) -> Result<Population<P::Solution>> {
        let population_size = self.options.get_population_size();
        let pairs = population_size.div_ceil(2);

        let children: Vec<[Individual<P::Solution>; 2]> = if self.options.is_parallel() {
            (0..pairs)
                .into_par_iter()
                .map(|pair| self.breed_pair(population, generation, pair, seed))
                .collect::<Result<_>>()?
        } else {
            (0..pairs)
                .map(|pair| self.breed_pair(population, generation, pair, seed))
                .collect::<Result<_>>()?
        };

        let mut offspring: Population<P::Solution> = children.into_iter().flatten().collect();
        offspring.truncate(population_size);
        Ok(offspring)
    }

    fn breed_pair(
        &self,
        population: &[Individual<P::Solution>],
        generation: usize,
        pair: usize,
        seed: u64,
    ) -> Result<[Individual<P::Solution>; 2]> {
        let mut rng = RandomNumberGenerator::for_task(seed, generation as u64 + 1, pair as u64);
        let constraints = self.problem.constraints();

        let first = self.selection.select(population, &mut rng)?;
        let second = self.selection.select(population, &mut rng)?;

        let (mut a, mut b) = first.solution.constrained_crossover(
            &second.solution,
            self.options.get_crossover_probability(),
            constraints,
            &mut rng,
        );
        let mutation_probability = self.options.get_mutation_probability();
        a.constrained_mutate(mutation_probability, constraints, &mut rng);
        b.constrained_mutate(mutation_probability, constraints, &mut rng);

        let a_objectives = self.problem.evaluate(&a);
        let b_objectives = self.problem.evaluate(&b);
        Ok([
            Individual::new(a, a_objectives),
            Individual::new(b, b_objectives),
        ])
    }

    fn log_generation(&self, generation: usize, population: &[Individual<P::Solution>]) {
        match self.options.get_log_level() {
            LogLevel::Verbose => {
                info!(
                    generation,
                    first_front = first_front_size(population),
                    infeasible = infeasible_count(population),
                    "Generation complete"
                );
                for individual in population.iter().filter(|i| i.rank == 0) {
                    debug!(generation, objectives = ?individual.objectives, "First front member");
                }
            }
            LogLevel::Minimal => debug!(
                generation,
                first_front = first_front_size(population),
                infeasible = infeasible_count(population),
                "Generation complete"
            ),
            LogLevel::None => {}
        }
    }
}

/// Keeps the best `n` individuals of `merged`.
///
/// Whole fronts are taken in rank order while they fit. The front that
/// overflows is ordered by descending crowding distance, ties keeping their
/// population order, and only its leading members are kept. Every returned
/// individual has its rank and crowding distance set.
///
/// ```rust
/// use rebalance::evolution::{environmental_selection, Individual};
///
/// let merged = vec![
///     Individual::new("a", vec![1.0, 3.0]),
///     Individual::new("b", vec![2.0, 2.0]),
///     Individual::new("c", vec![3.0, 1.0]),
///     Individual::new("d", vec![4.0, 4.0]),
/// ];
/// let survivors = environmental_selection(merged, 2);
/// let names: Vec<&str> = survivors.iter().map(|i| i.solution).collect();
/// assert_eq!(names, vec!["a", "c"]);
/// ```
pub fn environmental_selection<S>(merged: Vec<Individual<S>>, n: usize) -> Vec<Individual<S>> {
    let mut survivors = Vec::with_capacity(n.min(merged.len()));

    for mut front in into_fronts(merged) {
        if survivors.len() >= n {
            break;
        }
        crowding_distance(&mut front);

        let remaining = n - survivors.len();
        if front.len() <= remaining {
            survivors.extend(front);
        } else {
            front.sort_by(|a, b| b.crowding_distance.total_cmp(&a.crowding_distance));
            survivors.extend(front.into_iter().take(remaining));
        }
    }

    survivors
}

fn first_front_size<S>(population: &[Individual<S>]) -> usize {
    population.iter().filter(|i| i.rank == 0).count()
}

fn infeasible_count<S>(population: &[Individual<S>]) -> usize {
    population.iter().filter(|i| i.is_penalized()).count()
}
