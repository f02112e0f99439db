//! Operational disruption caused by moving workloads away from their
//! current nodes.
//!
//! The objective combines three components:
//!
//! * movement (weight 0.70): per replica set, the moved fraction shaped by a
//!   [`PenaltyShape`], averaged with the set sizes as weights. Workloads
//!   outside any replica set form one group of their own.
//! * cold start (weight 0.10): mean cold start of the moved workloads relative
//!   to a one minute baseline.
//! * time slots (weight 0.20): rollout rounds needed to move every replica set
//!   within its budget, relative to the rounds a full rollout of an average
//!   set would take.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cluster::model::{current_assignment, replica_set_budgets, PodInfo};
use crate::error::Result;
use crate::problem::Objective;
use crate::solution::{IntegerSolution, Solution, UNASSIGNED};

const MOVEMENT_WEIGHT: f64 = 0.70;
const COLD_START_WEIGHT: f64 = 0.10;
const TIME_SLOT_WEIGHT: f64 = 0.20;
const COLD_START_BASELINE_SECS: f64 = 60.0;

/// Maps a moved fraction in `[0, 1]` to a penalty in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PenaltyShape {
    Linear,
    /// Penalizes the first moves of a set the most.
    #[default]
    Sqrt,
    /// `(e^(lambda * x) - 1) / (e^lambda - 1)`; tolerates small moves.
    Exponential { lambda: f64 },
}

impl PenaltyShape {
    /// ```rust
    /// use rebalance::cluster::PenaltyShape;
    ///
    /// assert_eq!(PenaltyShape::Sqrt.apply(0.25), 0.5);
    /// assert_eq!(PenaltyShape::Linear.apply(0.25), 0.25);
    /// assert_eq!(PenaltyShape::Exponential { lambda: 2.0 }.apply(1.0), 1.0);
    /// ```
    pub fn apply(&self, ratio: f64) -> f64 {
        if ratio == 0.0 {
            return 0.0;
        }
        match *self {
            PenaltyShape::Linear => ratio,
            PenaltyShape::Sqrt => ratio.sqrt(),
            PenaltyShape::Exponential { lambda } if lambda == 0.0 => ratio,
            PenaltyShape::Exponential { lambda } => {
                (lambda * ratio).exp_m1() / lambda.exp_m1()
            }
        }
    }
}

/// Per-component view of a disruption value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisruptionBreakdown {
    pub moved: usize,
    pub movement: f64,
    pub cold_start: f64,
    pub time_slots: usize,
    pub total: f64,
}

/// Disruption relative to the current placement.
#[derive(Debug, Clone)]
pub struct DisruptionObjective {
    pods: Arc<[PodInfo]>,
    current: Vec<i64>,
    shape: PenaltyShape,
    /// Movement group of every workload. Replica sets come first; the
    /// workloads outside any set share the last group.
    group_of: Vec<usize>,
    group_sizes: Vec<usize>,
    /// Budget of each replica-set group, `None` for the ungrouped workloads.
    group_budgets: Vec<Option<u32>>,
    expected_time_slots: f64,
}

impl DisruptionObjective {
    pub fn new(pods: Arc<[PodInfo]>, shape: PenaltyShape) -> Self {
        let budgets = replica_set_budgets(&pods);

        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        let mut group_sizes = Vec::new();
        let mut group_budgets = Vec::new();
        let mut group_of = Vec::with_capacity(pods.len());
        for pod in pods.iter() {
            let key = pod.replica_set.as_deref();
            let group = *index.entry(key).or_insert_with(|| {
                group_sizes.push(0);
                group_budgets.push(key.and_then(|rs| budgets.get(rs).copied()));
                group_sizes.len() - 1
            });
            group_sizes[group] += 1;
            group_of.push(group);
        }

        let expected_time_slots = expected_time_slots(&group_sizes, &group_budgets);

        Self {
            current: current_assignment(&pods),
            pods,
            shape,
            group_of,
            group_sizes,
            group_budgets,
            expected_time_slots,
        }
    }

    pub fn shape(&self) -> PenaltyShape {
        self.shape
    }

    /// Number of workloads whose gene differs from their current node.
    pub fn movement_count(&self, genes: &[i64]) -> usize {
        self.moved(genes).count()
    }

    fn moved<'a>(&'a self, genes: &'a [i64]) -> impl Iterator<Item = usize> + 'a {
        genes
            .iter()
            .zip(&self.current)
            .enumerate()
            .filter(|(_, (&gene, &current))| gene != UNASSIGNED && gene != current)
            .map(|(idx, _)| idx)
    }

    /// Computes every component of the disruption of `genes`.
    pub fn breakdown(&self, genes: &[i64]) -> DisruptionBreakdown {
        let mut moved_per_group = vec![0usize; self.group_sizes.len()];
        let mut cold_start_secs = 0.0;
        let mut moved = 0usize;
        for idx in self.moved(genes) {
            moved_per_group[self.group_of[idx]] += 1;
            cold_start_secs += self.pods[idx].cold_start_secs;
            moved += 1;
        }

        let total_pods: usize = self.group_sizes.iter().sum();
        let movement = if total_pods == 0 {
            0.0
        } else {
            self.group_sizes
                .iter()
                .zip(&moved_per_group)
                .map(|(&size, &moved)| self.shape.apply(moved as f64 / size as f64) * size as f64)
                .sum::<f64>()
                / total_pods as f64
        };

        let cold_start = if moved == 0 {
            0.0
        } else {
            cold_start_secs / (moved as f64 * COLD_START_BASELINE_SECS)
        };

        let time_slots = if moved == 0 {
            0
        } else {
            self.group_budgets
                .iter()
                .zip(&moved_per_group)
                .filter_map(|(budget, &moved)| budget.map(|b| rollout_rounds(moved, b)))
                .fold(1, usize::max)
        };

        let total = MOVEMENT_WEIGHT * movement
            + COLD_START_WEIGHT * cold_start
            + TIME_SLOT_WEIGHT * time_slots as f64 / self.expected_time_slots;

        DisruptionBreakdown {
            moved,
            movement,
            cold_start,
            time_slots,
            total,
        }
    }
}

/// Rounds needed to move `count` replicas when `budget` may be down at once.
fn rollout_rounds(count: usize, budget: u32) -> usize {
    let budget = budget.max(1) as usize;
    count.div_ceil(budget)
}

/// Rounds of a full rollout, averaged over replica sets weighted by size.
fn expected_time_slots(group_sizes: &[usize], group_budgets: &[Option<u32>]) -> f64 {
    let in_sets: usize = group_sizes
        .iter()
        .zip(group_budgets)
        .filter(|(_, budget)| budget.is_some())
        .map(|(&size, _)| size)
        .sum();
    if in_sets == 0 {
        return 1.0;
    }

    let weighted: f64 = group_sizes
        .iter()
        .zip(group_budgets)
        .filter_map(|(&size, budget)| {
            budget.map(|b| rollout_rounds(size, b) as f64 * size as f64 / in_sets as f64)
        })
        .sum();
    weighted.ceil().max(1.0)
}

impl Objective<IntegerSolution> for DisruptionObjective {
    fn name(&self) -> &str {
        "disruption"
    }

    fn evaluate(&self, solution: &IntegerSolution) -> Result<f64> {
        Ok(self.breakdown(solution.genes()).total)
    }
}
