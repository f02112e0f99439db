//! # Problem
//!
//! A [`Problem`] is the read-only description of an optimization task: gene
//! bounds, an ordered list of minimized objectives, the constraints every
//! solution must satisfy, and an initializer. It is shared by reference with
//! every worker, so implementations must be `Send + Sync`.
//!
//! Evaluation never fails. An infeasible solution, a failing objective, or a
//! NaN result is mapped to `+inf` so that dominance pushes the solution out of
//! the early fronts.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rebalance::constraints::ConstraintSet;
//! use rebalance::problem::{FnObjective, Objective, Problem};
//! use rebalance::rng::RandomNumberGenerator;
//! use rebalance::solution::{Bounds, RealSolution, Solution};
//!
//! struct Schaffer {
//!     objectives: Vec<Arc<dyn Objective<RealSolution>>>,
//!     constraints: ConstraintSet<RealSolution>,
//! }
//!
//! impl Problem for Schaffer {
//!     type Solution = RealSolution;
//!
//!     fn name(&self) -> &str {
//!         "Schaffer"
//!     }
//!
//!     fn objectives(&self) -> &[Arc<dyn Objective<RealSolution>>] {
//!         &self.objectives
//!     }
//!
//!     fn constraints(&self) -> &ConstraintSet<RealSolution> {
//!         &self.constraints
//!     }
//!
//!     fn bounds(&self) -> Vec<Bounds<f64>> {
//!         vec![Bounds::new(-10.0, 10.0)]
//!     }
//!
//!     fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<RealSolution> {
//!         (0..n).map(|_| RealSolution::random(self.bounds(), rng)).collect()
//!     }
//! }
//!
//! let problem = Schaffer {
//!     objectives: vec![
//!         Arc::new(FnObjective::new("x^2", |s: &RealSolution| Ok(s.genes()[0].powi(2)))),
//!         Arc::new(FnObjective::new("(x-2)^2", |s: &RealSolution| Ok((s.genes()[0] - 2.0).powi(2)))),
//!     ],
//!     constraints: ConstraintSet::new(),
//! };
//!
//! let point = problem.evaluate(&RealSolution::new(vec![1.0], problem.bounds()));
//! assert_eq!(point, vec![1.0, 1.0]);
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::constraints::ConstraintSet;
use crate::error::{OptimizerError, Result};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, ObjectivePoint, Solution};

/// A single minimized objective function.
pub trait Objective<S>: Send + Sync {
    /// A short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Evaluates the objective for a complete solution.
    ///
    /// Objectives with adaptive state may record the value here.
    fn evaluate(&self, solution: &S) -> Result<f64>;

    /// Evaluates the objective without updating any adaptive state.
    ///
    /// Used on partial assignments during construction and for reporting.
    fn probe(&self, solution: &S) -> Result<f64> {
        self.evaluate(solution)
    }

    /// Called by the engine once every evaluation of a generation has completed.
    fn end_generation(&self) {}
}

/// An objective backed by a closure.
pub struct FnObjective<S, F> {
    name: String,
    function: F,
    _marker: PhantomData<fn(&S)>,
}

impl<S, F> FnObjective<S, F>
where
    F: Fn(&S) -> Result<f64> + Send + Sync,
{
    pub fn new<N: Into<String>>(name: N, function: F) -> Self {
        Self {
            name: name.into(),
            function,
            _marker: PhantomData,
        }
    }
}

impl<S, F> Debug for FnObjective<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObjective")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, F> Objective<S> for FnObjective<S, F>
where
    F: Fn(&S) -> Result<f64> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, solution: &S) -> Result<f64> {
        (self.function)(solution)
    }
}

/// The description of an optimization task.
pub trait Problem: Send + Sync {
    /// The encoding of candidate solutions.
    type Solution: Solution;

    fn name(&self) -> &str;

    /// The ordered objectives. Their count is the dimensionality of every objective point.
    fn objectives(&self) -> &[Arc<dyn Objective<Self::Solution>>];

    /// The conjunctive constraints.
    fn constraints(&self) -> &ConstraintSet<Self::Solution>;

    /// The per-gene bounds.
    fn bounds(&self) -> Vec<Bounds<<Self::Solution as Solution>::Gene>>;

    /// Produces the initial population.
    ///
    /// The engine treats any result whose length differs from `n` as a fatal
    /// configuration error.
    fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<Self::Solution>;

    /// Samples `n` points of the true Pareto front, when it is known.
    fn true_pareto_front(&self, _n: usize) -> Option<Vec<ObjectivePoint>> {
        None
    }

    /// Number of objectives.
    fn num_objectives(&self) -> usize {
        self.objectives().len()
    }

    /// Evaluates a solution into an objective point.
    ///
    /// Infeasible solutions, including any with a gene outside its bounds, get
    /// `+inf` on every objective and are not passed to the objective
    /// functions. A failing or NaN objective yields `+inf` for that objective
    /// only.
    fn evaluate(&self, solution: &Self::Solution) -> ObjectivePoint {
        evaluate_with(self, solution, |objective, s| objective.evaluate(s))
    }

    /// Like [`Problem::evaluate`], but leaves adaptive objective state untouched.
    fn probe(&self, solution: &Self::Solution) -> ObjectivePoint {
        evaluate_with(self, solution, |objective, s| objective.probe(s))
    }

    /// Advances every objective to the next generation.
    fn end_generation(&self) {
        for objective in self.objectives() {
            objective.end_generation();
        }
    }
}

fn evaluate_with<P, F>(problem: &P, solution: &P::Solution, mut eval: F) -> ObjectivePoint
where
    P: Problem + ?Sized,
    F: FnMut(&dyn Objective<P::Solution>, &P::Solution) -> Result<f64>,
{
    let objectives = problem.objectives();
    if !solution.is_within_bounds() || !problem.constraints().is_feasible(solution) {
        return vec![f64::INFINITY; objectives.len()];
    }

    objectives
        .iter()
        .map(|objective| match eval(objective.as_ref(), solution) {
            Ok(value) if !value.is_nan() => value,
            Ok(_) => {
                let err = OptimizerError::InvalidNumericValue(format!(
                    "objective '{}' returned NaN",
                    objective.name()
                ));
                debug!(error = %err, "Objective penalized");
                f64::INFINITY
            }
            Err(err) => {
                debug!(objective = objective.name(), error = %err, "Objective penalized");
                f64::INFINITY
            }
        })
        .collect()
}
