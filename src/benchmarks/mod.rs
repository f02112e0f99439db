//! # Benchmarks
//!
//! Real-coded test problems with known Pareto fronts, used to check that the
//! engine converges: the ZDT family (two objectives) and DTLZ1/DTLZ2 (any
//! number of objectives). All variables lie in `[0, 1]`.
//!
//! ```rust
//! use rebalance::benchmarks::zdt1;
//! use rebalance::evolution::{Nsga2, Nsga2Options};
//! use rebalance::pareto::inverted_generational_distance;
//! use rebalance::problem::Problem;
//!
//! let problem = zdt1(10);
//! let reference = problem.true_pareto_front(100).unwrap();
//!
//! let options = Nsga2Options::builder()
//!     .population_size(40)
//!     .num_generations(30)
//!     .seed(3)
//!     .build();
//! let engine = Nsga2::new(problem, options).unwrap();
//! let population = engine.run().unwrap();
//!
//! let front = engine.pareto_front(&population);
//! let igd = inverted_generational_distance(&front, &reference).unwrap();
//! assert!(igd.is_finite());
//! ```

pub mod dtlz;
pub mod suite;
pub mod zdt;

use std::fmt;
use std::sync::Arc;

use crate::constraints::ConstraintSet;
use crate::problem::{Objective, Problem};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, ObjectivePoint, RealSolution};

pub use dtlz::{dtlz1, dtlz2};
pub use suite::{BenchmarkReport, BenchmarkSuite};
pub use zdt::{zdt1, zdt2, zdt3};

/// Number of reference points sampled from a true front for reporting.
pub const REFERENCE_FRONT_POINTS: usize = 500;

type FrontSampler = fn(usize, usize) -> Option<Vec<ObjectivePoint>>;

/// An unconstrained real-coded problem over the unit hypercube.
#[derive(Clone)]
pub struct Benchmark {
    name: String,
    num_variables: usize,
    objectives: Vec<Arc<dyn Objective<RealSolution>>>,
    constraints: ConstraintSet<RealSolution>,
    front: FrontSampler,
}

impl Benchmark {
    fn new(
        name: String,
        num_variables: usize,
        objectives: Vec<Arc<dyn Objective<RealSolution>>>,
        front: FrontSampler,
    ) -> Self {
        Self {
            name,
            num_variables,
            objectives,
            constraints: ConstraintSet::new(),
            front,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }
}

impl fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("num_variables", &self.num_variables)
            .field("num_objectives", &self.objectives.len())
            .finish()
    }
}

impl Problem for Benchmark {
    type Solution = RealSolution;

    fn name(&self) -> &str {
        &self.name
    }

    fn objectives(&self) -> &[Arc<dyn Objective<RealSolution>>] {
        &self.objectives
    }

    fn constraints(&self) -> &ConstraintSet<RealSolution> {
        &self.constraints
    }

    fn bounds(&self) -> Vec<Bounds<f64>> {
        vec![Bounds::new(0.0, 1.0); self.num_variables]
    }

    fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<RealSolution> {
        (0..n)
            .map(|_| RealSolution::random(self.bounds(), rng))
            .collect()
    }

    fn true_pareto_front(&self, n: usize) -> Option<Vec<ObjectivePoint>> {
        (self.front)(n, self.objectives.len())
    }
}

/// `n` evenly spaced values from 0 to 1 inclusive.
fn unit_grid(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Solution;

    #[test]
    fn test_initial_solutions_lie_in_unit_cube() {
        let problem = zdt1(30);
        let mut rng = RandomNumberGenerator::from_seed(1);
        let population = problem.initialize(20, &mut rng);
        assert_eq!(population.len(), 20);
        for solution in population {
            assert_eq!(solution.genes().len(), 30);
            assert!(solution.is_within_bounds());
        }
    }

    #[test]
    fn test_unit_grid() {
        assert_eq!(unit_grid(3).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(unit_grid(1).collect::<Vec<_>>(), vec![0.0]);
    }
}
