//! Turning a Pareto front into an ordered list of candidate placements.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::cluster::model::{replica_set_budgets, NodeInfo, PodInfo};
use crate::cluster::problem::{ClusterProblem, SeededProblem};
use crate::error::{OptimizerError, Result};
use crate::evolution::{Individual, Nsga2, Nsga2Options};
use crate::pareto::first_front;
use crate::problem::Problem;
use crate::solution::{IntegerSolution, ObjectivePoint};

/// Relative importance of cost, disruption and balance when ranking.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightConfig {
    pub cost: f64,
    pub disruption: f64,
    pub balance: f64,
}

impl WeightConfig {
    /// Creates a validated weight configuration.
    ///
    /// # Errors
    ///
    /// See [`WeightConfig::validate`].
    pub fn new(cost: f64, disruption: f64, balance: f64) -> Result<Self> {
        let weights = Self {
            cost,
            disruption,
            balance,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Checks that every weight lies in `[0, 1]` and that positive weights
    /// sum to 1 within a tolerance of 0.01.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::Configuration` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("cost", self.cost),
            ("disruption", self.disruption),
            ("balance", self.balance),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(OptimizerError::Configuration(format!(
                    "Weight '{}' must be within [0, 1], got {}",
                    name, weight
                )));
            }
        }
        let sum = self.sum();
        if sum > 0.0 && !(0.99..=1.01).contains(&sum) {
            return Err(OptimizerError::Configuration(format!(
                "Weights must sum to 1, got {:.4}",
                sum
            )));
        }
        Ok(())
    }

    /// Returns the default weights when every weight is zero, `self` otherwise.
    pub fn resolved(&self) -> Self {
        if self.sum() == 0.0 {
            Self::default()
        } else {
            *self
        }
    }

    /// Weighted sum of an objective point ordered as cost, disruption, balance.
    pub fn score(&self, objectives: &[f64]) -> f64 {
        [self.cost, self.disruption, self.balance]
            .iter()
            .zip(objectives)
            .map(|(w, v)| w * v)
            .sum()
    }

    fn sum(&self) -> f64 {
        self.cost + self.disruption + self.balance
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            cost: 0.33,
            disruption: 0.33,
            balance: 0.34,
        }
    }
}

/// A candidate placement with its scores.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAssignment {
    /// Target node index of every workload.
    pub assignment: Vec<i64>,
    /// Cost, disruption and balance.
    pub objectives: ObjectivePoint,
    pub weighted_score: f64,
    /// Workloads whose target differs from their current node.
    pub movement_count: usize,
}

/// Ranks first-front individuals by weighted score, best first.
///
/// Equal scores keep their front order. Repeated assignments are dropped,
/// keeping the best-ranked copy.
pub fn rank_front(
    front: &[Individual<IntegerSolution>],
    pods: &[PodInfo],
    weights: &WeightConfig,
) -> Vec<RankedAssignment> {
    let mut ranked: Vec<RankedAssignment> = front
        .iter()
        .map(|individual| {
            let assignment = individual.genes().to_vec();
            RankedAssignment {
                movement_count: movement_count(&assignment, pods),
                weighted_score: weights.score(&individual.objectives),
                objectives: individual.objectives.clone(),
                assignment,
            }
        })
        .collect();
    ranked.sort_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score));

    let mut seen = HashSet::new();
    ranked.retain(|r| seen.insert(r.assignment.clone()));
    ranked
}

fn movement_count(assignment: &[i64], pods: &[PodInfo]) -> usize {
    assignment
        .iter()
        .zip(pods)
        .filter(|(&target, pod)| target != pod.node as i64)
        .count()
}

/// Moves that can be carried out in a first rollout round.
///
/// Per replica set at most `max_unavailable` of the workloads that change node
/// are returned, in pod order; sets with a zero budget contribute none.
/// Workloads outside any replica set are treated as one group with a budget
/// of 1. Returns pod indices in ascending order.
///
/// ```rust
/// use rebalance::cluster::{feasible_movements, PodInfo};
///
/// let pods = vec![
///     PodInfo::new("web-0", 0, 100.0, 1e8).in_replica_set("web", 1),
///     PodInfo::new("web-1", 0, 100.0, 1e8).in_replica_set("web", 1),
///     PodInfo::new("db-0", 0, 100.0, 1e8).in_replica_set("db", 0),
/// ];
/// assert_eq!(feasible_movements(&[1, 1, 1], &pods), vec![0]);
/// ```
pub fn feasible_movements(assignment: &[i64], pods: &[PodInfo]) -> Vec<usize> {
    let budgets = replica_set_budgets(pods);
    let mut used: HashMap<Option<&str>, usize> = HashMap::new();

    let mut moves = Vec::new();
    for (idx, (pod, &target)) in pods.iter().zip(assignment).enumerate() {
        if target == pod.node as i64 {
            continue;
        }
        let key = pod.replica_set.as_deref();
        let budget = key
            .and_then(|rs| budgets.get(rs).copied())
            .unwrap_or(1) as usize;
        let count = used.entry(key).or_insert(0);
        if *count < budget {
            *count += 1;
            moves.push(idx);
        }
    }
    moves
}

/// Computes ranked rebalancing candidates for a cluster snapshot.
///
/// Builds the cluster problem, seeding it with `seeds` when any are given,
/// runs NSGA-II, and ranks the feasible members of the final first front by
/// `weights`. Objective points are re-evaluated against the final
/// normalization so that every candidate is scored on the same scale.
///
/// # Errors
///
/// Returns a configuration error for invalid weights, options or cluster
/// snapshot, and propagates engine initialization failures.
pub fn rebalance(
    nodes: Vec<NodeInfo>,
    pods: Vec<PodInfo>,
    options: Nsga2Options,
    weights: &WeightConfig,
    seeds: Vec<Vec<i64>>,
) -> Result<Vec<RankedAssignment>> {
    weights.validate()?;
    let weights = weights.resolved();

    let problem = ClusterProblem::new(nodes, pods)?;
    let pods = problem.pods().clone();

    let front = if seeds.is_empty() {
        optimize(problem, options)?
    } else {
        optimize(SeededProblem::new(problem, seeds), options)?
    };

    let ranked = rank_front(&front, &pods, &weights);
    match ranked.first() {
        Some(best) => info!(
            candidates = ranked.len(),
            best_score = best.weighted_score,
            best_movements = best.movement_count,
            "Rebalancing candidates ranked"
        ),
        None => warn!("No feasible rebalancing candidate found"),
    }
    Ok(ranked)
}

/// Runs the engine and returns the feasible first front with re-evaluated objectives.
fn optimize<P>(problem: P, options: Nsga2Options) -> Result<Vec<Individual<IntegerSolution>>>
where
    P: Problem<Solution = IntegerSolution>,
{
    let engine = Nsga2::new(problem, options)?;
    let population = engine.run()?;

    let (feasible, penalized): (Vec<_>, Vec<_>) = first_front(&population)
        .into_iter()
        .partition(|individual| !individual.is_penalized());
    for individual in &penalized {
        for violation in engine.problem().constraints().check_all(&individual.solution) {
            debug!(%violation, "Dropping infeasible first-front member");
        }
    }

    Ok(feasible
        .into_iter()
        .map(|mut individual| {
            individual.objectives = engine.problem().probe(&individual.solution);
            individual
        })
        .collect())
}
