//! Constraints over workload-to-node assignments.
//!
//! Both constraints skip [`UNASSIGNED`] genes, so they can be checked against
//! the partial assignments built by the constructive warm start.

use std::sync::Arc;

use crate::cluster::model::{replica_set_budgets, NodeInfo, PodInfo};
use crate::constraints::{Constraint, ConstraintViolation};
use crate::solution::{IntegerSolution, Solution, UNASSIGNED};

/// Per-node CPU and memory requests must not exceed capacity.
///
/// A gene outside `[0, nodes)` other than [`UNASSIGNED`] is a violation.
#[derive(Debug, Clone)]
pub struct ResourceConstraint {
    pods: Arc<[PodInfo]>,
    nodes: Arc<[NodeInfo]>,
}

impl ResourceConstraint {
    pub fn new(pods: Arc<[PodInfo]>, nodes: Arc<[NodeInfo]>) -> Self {
        Self { pods, nodes }
    }

    /// Returns the CPU and memory requested on each node.
    fn usage(&self, genes: &[i64]) -> std::result::Result<Vec<(f64, f64)>, usize> {
        let mut usage = vec![(0.0, 0.0); self.nodes.len()];
        for (pod_idx, &gene) in genes.iter().enumerate() {
            if gene == UNASSIGNED {
                continue;
            }
            let node = usize::try_from(gene)
                .ok()
                .filter(|&n| n < self.nodes.len())
                .ok_or(pod_idx)?;
            usage[node].0 += self.pods[pod_idx].cpu_request;
            usage[node].1 += self.pods[pod_idx].mem_request;
        }
        Ok(usage)
    }
}

impl Constraint<IntegerSolution> for ResourceConstraint {
    fn name(&self) -> &str {
        "Resource"
    }

    fn check(&self, solution: &IntegerSolution) -> Vec<ConstraintViolation> {
        let usage = match self.usage(solution.genes()) {
            Ok(usage) => usage,
            Err(pod_idx) => {
                return vec![ConstraintViolation::new(
                    self.name(),
                    format!(
                        "pod '{}' assigned to invalid node {}",
                        self.pods[pod_idx].name,
                        solution.genes()[pod_idx]
                    ),
                )]
            }
        };

        let mut violations = Vec::new();
        for (node, &(cpu, mem)) in self.nodes.iter().zip(&usage) {
            if cpu > node.cpu_capacity {
                violations.push(ConstraintViolation::new(
                    self.name(),
                    format!("node '{}' CPU {} > {}", node.name, cpu, node.cpu_capacity),
                ));
            }
            if mem > node.mem_capacity {
                violations.push(ConstraintViolation::new(
                    self.name(),
                    format!("node '{}' memory {} > {}", node.name, mem, node.mem_capacity),
                ));
            }
        }
        violations
    }

    fn is_satisfied(&self, solution: &IntegerSolution) -> bool {
        match self.usage(solution.genes()) {
            Ok(usage) => self
                .nodes
                .iter()
                .zip(&usage)
                .all(|(node, &(cpu, mem))| cpu <= node.cpu_capacity && mem <= node.mem_capacity),
            Err(_) => false,
        }
    }
}

/// Workloads whose replica set tolerates no unavailable replica must stay where they are.
#[derive(Debug, Clone)]
pub struct DisruptionBudgetConstraint {
    /// `(pod index, current node)` of every pinned workload.
    pinned: Vec<(usize, i64)>,
}

impl DisruptionBudgetConstraint {
    pub fn new(pods: &[PodInfo]) -> Self {
        let budgets = replica_set_budgets(pods);

        let pinned = pods
            .iter()
            .enumerate()
            .filter(|(_, pod)| {
                pod.replica_set
                    .as_deref()
                    .and_then(|rs| budgets.get(rs))
                    .is_some_and(|&budget| budget == 0)
            })
            .map(|(idx, pod)| (idx, pod.node as i64))
            .collect();

        Self { pinned }
    }

    /// Number of workloads that may not move.
    pub fn pinned_count(&self) -> usize {
        self.pinned.len()
    }

    fn moved<'a>(&'a self, genes: &'a [i64]) -> impl Iterator<Item = usize> + 'a {
        self.pinned
            .iter()
            .filter(move |&&(idx, node)| genes[idx] != UNASSIGNED && genes[idx] != node)
            .map(|&(idx, _)| idx)
    }
}

impl Constraint<IntegerSolution> for DisruptionBudgetConstraint {
    fn name(&self) -> &str {
        "DisruptionBudget"
    }

    fn check(&self, solution: &IntegerSolution) -> Vec<ConstraintViolation> {
        self.moved(solution.genes())
            .map(|idx| {
                ConstraintViolation::new(
                    self.name(),
                    format!("pod {} moved although its replica set allows no disruption", idx),
                )
            })
            .collect()
    }

    fn is_satisfied(&self, solution: &IntegerSolution) -> bool {
        self.moved(solution.genes()).next().is_none()
    }
}
