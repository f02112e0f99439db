//! # Constraints Module
//!
//! Hard constraints a candidate solution must satisfy. Constraints are
//! conjunctive: a solution is feasible iff every registered constraint is
//! satisfied.
//!
//! ## Key Components
//!
//! - `Constraint` trait: a named predicate that can also describe its violations
//! - `ConstraintViolation`: a specific violation of a constraint
//! - `ConstraintSet`: an ordered, cheaply cloneable collection of constraints
//! - `FnConstraint`: adapts a closure into a constraint
//! - [`cluster`]: capacity and disruption-budget constraints for workload assignments
//!
//! ## Basic Usage
//!
//! ```rust
//! use rebalance::constraints::{Constraint, ConstraintSet, ConstraintViolation, FnConstraint};
//! use rebalance::solution::{Bounds, IntegerSolution, Solution};
//!
//! // At most two genes may point at node 0.
//! #[derive(Debug)]
//! struct NodeZeroLimit;
//!
//! impl Constraint<IntegerSolution> for NodeZeroLimit {
//!     fn name(&self) -> &str {
//!         "NodeZeroLimit"
//!     }
//!
//!     fn check(&self, solution: &IntegerSolution) -> Vec<ConstraintViolation> {
//!         let count = solution.genes().iter().filter(|&&g| g == 0).count();
//!         if count > 2 {
//!             vec![ConstraintViolation::new(
//!                 self.name(),
//!                 format!("{} genes assigned to node 0", count),
//!             )]
//!         } else {
//!             Vec::new()
//!         }
//!     }
//! }
//!
//! let constraints = ConstraintSet::builder()
//!     .with_constraint(NodeZeroLimit)
//!     .with_constraint(FnConstraint::new("NoNegative", |s: &IntegerSolution| {
//!         s.genes().iter().all(|&g| g >= 0)
//!     }))
//!     .build();
//!
//! let bounds = vec![Bounds::new(0, 3); 4];
//! assert!(constraints.is_feasible(&IntegerSolution::new(vec![0, 0, 1, 2], bounds.clone())));
//! assert!(!constraints.is_feasible(&IntegerSolution::new(vec![0, 0, 0, 2], bounds)));
//! ```

use std::fmt::{Debug, Display};
use std::sync::Arc;

pub mod cluster;

pub use cluster::{DisruptionBudgetConstraint, ResourceConstraint};

/// Represents a violation of a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// The name of the constraint that was violated
    constraint_name: String,
    /// A description of the violation
    description: String,
}

impl ConstraintViolation {
    /// Creates a new constraint violation with the given name and description.
    pub fn new<S: Into<String>, D: Into<String>>(constraint_name: S, description: D) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            description: description.into(),
        }
    }

    /// Returns the name of the constraint that was violated.
    pub fn constraint_name(&self) -> &str {
        &self.constraint_name
    }

    /// Returns the description of the violation.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Constraint '{}' violated: {}",
            self.constraint_name(),
            self.description()
        )
    }
}

/// Trait for defining hard constraints on solutions.
///
/// Constraints are shared read-only across worker threads and must be pure.
pub trait Constraint<S>: Debug + Send + Sync {
    /// A short identifier used in violation reports.
    fn name(&self) -> &str;

    /// Checks the solution against this constraint.
    ///
    /// Returns a vector of constraint violations. An empty vector indicates
    /// that the solution satisfies the constraint.
    fn check(&self, solution: &S) -> Vec<ConstraintViolation>;

    /// Returns `true` if the solution satisfies this constraint.
    ///
    /// The default delegates to [`Constraint::check`]. Implementations on hot
    /// paths override it to skip building violation reports.
    fn is_satisfied(&self, solution: &S) -> bool {
        self.check(solution).is_empty()
    }
}

/// An ordered collection of constraints, all of which must hold.
#[derive(Debug)]
pub struct ConstraintSet<S> {
    constraints: Vec<Arc<dyn Constraint<S>>>,
}

impl<S> ConstraintSet<S> {
    /// Creates a new empty constraint set.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Creates a new constraint set builder.
    pub fn builder() -> ConstraintSetBuilder<S> {
        ConstraintSetBuilder::new()
    }

    /// Adds a constraint to the set.
    pub fn add_constraint<C>(&mut self, constraint: C) -> &mut Self
    where
        C: Constraint<S> + 'static,
    {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Adds an already shared constraint to the set.
    pub fn add_shared(&mut self, constraint: Arc<dyn Constraint<S>>) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns `true` if the solution satisfies every constraint.
    ///
    /// Stops at the first unsatisfied constraint. An empty set accepts everything.
    pub fn is_feasible(&self, solution: &S) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(solution))
    }

    /// Collects the violations of every constraint.
    pub fn check_all(&self, solution: &S) -> Vec<ConstraintViolation> {
        self.constraints
            .iter()
            .flat_map(|c| c.check(solution))
            .collect()
    }

    /// Returns the constraints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Constraint<S>>> {
        self.constraints.iter()
    }

    /// Returns the number of constraints in the set.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the set has no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<S> Clone for ConstraintSet<S> {
    fn clone(&self) -> Self {
        Self {
            constraints: self.constraints.clone(),
        }
    }
}

impl<S> Default for ConstraintSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a constraint set with a fluent API.
#[derive(Debug)]
pub struct ConstraintSetBuilder<S> {
    constraints: Vec<Arc<dyn Constraint<S>>>,
}

impl<S> ConstraintSetBuilder<S> {
    /// Creates a new empty constraint set builder.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Adds a constraint to the set.
    pub fn with_constraint<C>(mut self, constraint: C) -> Self
    where
        C: Constraint<S> + 'static,
    {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Builds the constraint set.
    pub fn build(self) -> ConstraintSet<S> {
        ConstraintSet {
            constraints: self.constraints,
        }
    }
}

impl<S> Default for ConstraintSetBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A constraint backed by a predicate closure.
pub struct FnConstraint<F> {
    name: String,
    predicate: F,
}

impl<F> FnConstraint<F> {
    pub fn new<N: Into<String>>(name: N, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> Debug for FnConstraint<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnConstraint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, F> Constraint<S> for FnConstraint<F>
where
    F: Fn(&S) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, solution: &S) -> Vec<ConstraintViolation> {
        if (self.predicate)(solution) {
            Vec::new()
        } else {
            vec![ConstraintViolation::new(&self.name, "predicate returned false")]
        }
    }

    fn is_satisfied(&self, solution: &S) -> bool {
        (self.predicate)(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::{Bounds, IntegerSolution, Solution};

    #[derive(Debug)]
    struct SumLimit(i64);

    impl Constraint<IntegerSolution> for SumLimit {
        fn name(&self) -> &str {
            "SumLimit"
        }

        fn check(&self, solution: &IntegerSolution) -> Vec<ConstraintViolation> {
            let sum: i64 = solution.genes().iter().sum();
            if sum > self.0 {
                vec![ConstraintViolation::new(
                    self.name(),
                    format!("sum {} exceeds {}", sum, self.0),
                )]
            } else {
                Vec::new()
            }
        }
    }

    fn solution(genes: Vec<i64>) -> IntegerSolution {
        let n = genes.len();
        IntegerSolution::new(genes, vec![Bounds::new(0, 9); n])
    }

    #[test]
    fn test_constraint_violation() {
        let violation = ConstraintViolation::new("TestConstraint", "Test violation");
        assert_eq!(violation.constraint_name(), "TestConstraint");
        assert_eq!(violation.description(), "Test violation");
        assert_eq!(
            violation.to_string(),
            "Constraint 'TestConstraint' violated: Test violation"
        );
    }

    #[test]
    fn test_empty_set_accepts_everything() {
        let set: ConstraintSet<IntegerSolution> = ConstraintSet::new();
        assert!(set.is_empty());
        assert!(set.is_feasible(&solution(vec![9, 9, 9])));
    }

    #[test]
    fn test_constraint_set_is_conjunctive() {
        let mut set = ConstraintSet::new();
        set.add_constraint(SumLimit(10)).add_constraint(FnConstraint::new(
            "FirstIsZero",
            |s: &IntegerSolution| s.genes()[0] == 0,
        ));
        assert_eq!(set.len(), 2);

        assert!(set.is_feasible(&solution(vec![0, 5, 5])));
        assert!(!set.is_feasible(&solution(vec![1, 2, 3])));
        assert!(!set.is_feasible(&solution(vec![0, 9, 9])));

        let violations = set.check_all(&solution(vec![1, 9, 9]));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint_name(), "SumLimit");
        assert_eq!(violations[1].constraint_name(), "FirstIsZero");
    }

    #[test]
    fn test_builder_and_clone_share_constraints() {
        let set = ConstraintSet::builder().with_constraint(SumLimit(3)).build();
        let cloned = set.clone();
        assert_eq!(cloned.len(), 1);
        assert!(!cloned.is_feasible(&solution(vec![2, 2])));
    }
}
