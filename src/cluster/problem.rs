use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cluster::balance::BalanceObjective;
use crate::cluster::cost::CostObjective;
use crate::cluster::disruption::{DisruptionObjective, PenaltyShape};
use crate::cluster::model::{validate, NodeInfo, PodInfo};
use crate::constraints::{ConstraintSet, DisruptionBudgetConstraint, ResourceConstraint};
use crate::error::Result;
use crate::operators::CrossoverKind;
use crate::problem::{Objective, Problem};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, IntegerSolution, ObjectivePoint, Solution};
use crate::warmstart::{Gcsh, GcshConfig};

/// Percentage of the initial population that previously found assignments may fill.
pub const MAX_SEED_PERCENT: usize = 70;

/// Reassignment of workloads to nodes.
///
/// Gene `i` is the index of the node workload `i` should run on. The
/// objectives are, in order, normalized cost, disruption and balance; all
/// three are minimized. Solutions must respect node capacity and may not move
/// workloads whose replica set tolerates no disruption.
///
/// The initial population is built by the constructive warm start, trading
/// off cost against balance, with the current placement as its first member.
pub struct ClusterProblem {
    nodes: Arc<[NodeInfo]>,
    pods: Arc<[PodInfo]>,
    cost: Arc<CostObjective>,
    disruption: Arc<DisruptionObjective>,
    objectives: Vec<Arc<dyn Objective<IntegerSolution>>>,
    constraints: ConstraintSet<IntegerSolution>,
    warm_start: Gcsh,
    crossover: CrossoverKind,
}

impl ClusterProblem {
    /// Builds the problem with the default movement penalty.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no nodes, a workload is placed on a node
    /// that does not exist, or any capacity, cost or request is not finite.
    pub fn new(nodes: Vec<NodeInfo>, pods: Vec<PodInfo>) -> Result<Self> {
        Self::with_penalty(nodes, pods, PenaltyShape::default())
    }

    /// Builds the problem with the given movement penalty shape.
    pub fn with_penalty(nodes: Vec<NodeInfo>, pods: Vec<PodInfo>, shape: PenaltyShape) -> Result<Self> {
        validate(&nodes, &pods)?;
        let nodes: Arc<[NodeInfo]> = nodes.into();
        let pods: Arc<[PodInfo]> = pods.into();

        let cost = Arc::new(CostObjective::new(&pods, nodes.clone()));
        let disruption = Arc::new(DisruptionObjective::new(pods.clone(), shape));
        let balance: Arc<dyn Objective<IntegerSolution>> =
            Arc::new(BalanceObjective::new(pods.clone(), nodes.clone()));

        let budget = DisruptionBudgetConstraint::new(&pods);
        debug!(pinned = budget.pinned_count(), "Pods pinned by disruption budgets");
        let constraints = ConstraintSet::builder()
            .with_constraint(ResourceConstraint::new(pods.clone(), nodes.clone()))
            .with_constraint(budget)
            .build();

        let objectives: Vec<Arc<dyn Objective<IntegerSolution>>> =
            vec![cost.clone(), disruption.clone(), balance.clone()];

        let warm_start = Gcsh::new(GcshConfig {
            pods: pods.clone(),
            nodes: nodes.clone(),
            objectives: vec![cost.clone(), balance],
            constraints: constraints.clone(),
            include_current_state: true,
        });

        info!(
            nodes = nodes.len(),
            pods = pods.len(),
            "Cluster problem created"
        );

        Ok(Self {
            nodes,
            pods,
            cost,
            disruption,
            objectives,
            constraints,
            warm_start,
            crossover: CrossoverKind::default(),
        })
    }

    /// Sets the recombination used by the initial solutions and their offspring.
    pub fn with_crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn nodes(&self) -> &Arc<[NodeInfo]> {
        &self.nodes
    }

    pub fn pods(&self) -> &Arc<[PodInfo]> {
        &self.pods
    }

    pub fn cost_objective(&self) -> &CostObjective {
        &self.cost
    }

    pub fn disruption_objective(&self) -> &DisruptionObjective {
        &self.disruption
    }

    /// The unchanged current placement.
    pub fn current_state(&self) -> IntegerSolution {
        self.warm_start
            .current_state_solution()
            .with_crossover(self.crossover)
    }
}

impl Problem for ClusterProblem {
    type Solution = IntegerSolution;

    fn name(&self) -> &str {
        "cluster-rebalance"
    }

    fn objectives(&self) -> &[Arc<dyn Objective<IntegerSolution>>] {
        &self.objectives
    }

    fn constraints(&self) -> &ConstraintSet<IntegerSolution> {
        &self.constraints
    }

    fn bounds(&self) -> Vec<Bounds<i64>> {
        vec![Bounds::new(0, self.nodes.len() as i64 - 1); self.pods.len()]
    }

    fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<IntegerSolution> {
        self.warm_start
            .generate_initial_population(n, rng)
            .into_iter()
            .map(|s| s.with_crossover(self.crossover))
            .collect()
    }
}

/// An integer problem whose initial population starts from known assignments.
///
/// Up to [`MAX_SEED_PERCENT`] percent of the population is taken from the seeds in
/// order; the inner problem's initializer fills the rest. Seeds whose length
/// does not match the gene count, or with a gene outside its bounds, are
/// skipped.
pub struct SeededProblem<P> {
    inner: P,
    seeds: Vec<Vec<i64>>,
}

impl<P> SeededProblem<P>
where
    P: Problem<Solution = IntegerSolution>,
{
    pub fn new(inner: P, seeds: Vec<Vec<i64>>) -> Self {
        Self { inner, seeds }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> Problem for SeededProblem<P>
where
    P: Problem<Solution = IntegerSolution>,
{
    type Solution = IntegerSolution;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn objectives(&self) -> &[Arc<dyn Objective<IntegerSolution>>] {
        self.inner.objectives()
    }

    fn constraints(&self) -> &ConstraintSet<IntegerSolution> {
        self.inner.constraints()
    }

    fn bounds(&self) -> Vec<Bounds<i64>> {
        self.inner.bounds()
    }

    fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<IntegerSolution> {
        let bounds = self.bounds();
        let max_seeds = n * MAX_SEED_PERCENT / 100;

        let valid: Vec<IntegerSolution> = self
            .seeds
            .iter()
            .filter(|seed| seed.len() == bounds.len())
            .map(|seed| IntegerSolution::new(seed.clone(), bounds.clone()))
            .filter(IntegerSolution::is_within_bounds)
            .collect();
        let skipped = self.seeds.len() - valid.len();
        if skipped > 0 {
            warn!(
                skipped,
                expected_len = bounds.len(),
                "Ignoring seeds of the wrong length or with genes outside the bounds"
            );
        }
        let usable: Vec<IntegerSolution> = valid.into_iter().take(max_seeds).collect();
        if !usable.is_empty() {
            info!(
                population_size = n,
                available = self.seeds.len(),
                seeded = usable.len(),
                "Seeding initial population"
            );
        }

        let rest = self.inner.initialize(n - usable.len(), rng);
        let crossover = rest
            .first()
            .map(IntegerSolution::crossover_kind)
            .unwrap_or_default();

        let mut solutions: Vec<IntegerSolution> = usable
            .into_iter()
            .map(|seed| seed.with_crossover(crossover))
            .collect();
        solutions.extend(rest);
        solutions
    }

    fn true_pareto_front(&self, n: usize) -> Option<Vec<ObjectivePoint>> {
        self.inner.true_pareto_front(n)
    }
}
