//! Hourly cost of the nodes an assignment keeps busy.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cluster::model::{NodeInfo, PodInfo};
use crate::error::Result;
use crate::normalization::AdaptiveNormalizer;
use crate::problem::Objective;
use crate::solution::{IntegerSolution, Solution, UNASSIGNED};

/// Sum of the hourly cost of every node hosting at least one workload.
///
/// Genes that are [`UNASSIGNED`] or out of range are ignored.
pub fn active_node_cost(genes: &[i64], nodes: &[NodeInfo]) -> f64 {
    let mut active = vec![false; nodes.len()];
    for &gene in genes {
        if gene == UNASSIGNED {
            continue;
        }
        if let Some(slot) = usize::try_from(gene).ok().and_then(|n| active.get_mut(n)) {
            *slot = true;
        }
    }
    nodes
        .iter()
        .zip(active)
        .filter(|(_, active)| *active)
        .map(|(node, _)| node.hourly_cost)
        .sum()
}

/// Approximates the cheapest feasible packing with Best-Fit-Decreasing.
///
/// Returns the cost of the opened nodes.
pub fn best_fit_decreasing(pods: &[PodInfo], nodes: &[NodeInfo]) -> f64 {
    best_fit_decreasing_assignment(pods, nodes).0
}

/// Best-Fit-Decreasing packing together with the resulting assignment.
///
/// Workloads are taken largest first. Each goes to the open node it fits
/// most tightly, or, when no open node has room, to the node with the lowest
/// cost per capacity unit that can take it. Workloads that fit nowhere stay
/// [`UNASSIGNED`] and add nothing to the cost.
///
/// ```rust
/// use rebalance::cluster::{best_fit_decreasing_assignment, NodeInfo, PodInfo};
///
/// let nodes = vec![
///     NodeInfo::new("expensive", 4000.0, 8e9, 4.0),
///     NodeInfo::new("cheap", 4000.0, 8e9, 1.0),
/// ];
/// let pods = vec![
///     PodInfo::new("a", 0, 1000.0, 1e9),
///     PodInfo::new("b", 0, 1000.0, 1e9),
/// ];
/// let (cost, assignment) = best_fit_decreasing_assignment(&pods, &nodes);
/// assert_eq!(cost, 1.0);
/// assert_eq!(assignment, vec![1, 1]);
/// ```
pub fn best_fit_decreasing_assignment(pods: &[PodInfo], nodes: &[NodeInfo]) -> (f64, Vec<i64>) {
    let mut assignment = vec![UNASSIGNED; pods.len()];
    if nodes.is_empty() || pods.is_empty() {
        return (0.0, assignment);
    }

    let mut pod_order: Vec<usize> = (0..pods.len()).collect();
    pod_order.sort_by(|&a, &b| pods[b].size_units().total_cmp(&pods[a].size_units()));

    let cost_per_unit = |node: &NodeInfo| {
        let units = node.capacity_units();
        node.hourly_cost / if units == 0.0 { 1.0 } else { units }
    };
    let mut node_order: Vec<usize> = (0..nodes.len()).collect();
    node_order.sort_by(|&a, &b| cost_per_unit(&nodes[a]).total_cmp(&cost_per_unit(&nodes[b])));

    let mut cpu_remaining: Vec<f64> = nodes.iter().map(|n| n.cpu_capacity).collect();
    let mut mem_remaining: Vec<f64> = nodes.iter().map(|n| n.mem_capacity).collect();
    let mut active = vec![false; nodes.len()];
    let mut unplaced = 0usize;

    for pod_idx in pod_order {
        let pod = &pods[pod_idx];
        let fits = |n: usize| cpu_remaining[n] >= pod.cpu_request && mem_remaining[n] >= pod.mem_request;

        let best_open = node_order
            .iter()
            .copied()
            .filter(|&n| active[n] && fits(n))
            .map(|n| {
                let cpu_slack = slack(cpu_remaining[n] - pod.cpu_request, nodes[n].cpu_capacity);
                let mem_slack = slack(mem_remaining[n] - pod.mem_request, nodes[n].mem_capacity);
                (n, cpu_slack + mem_slack)
            })
            .fold(None, |best: Option<(usize, f64)>, (n, fit)| match best {
                Some((_, best_fit)) if best_fit <= fit => best,
                _ => Some((n, fit)),
            })
            .map(|(n, _)| n);

        let chosen = best_open.or_else(|| node_order.iter().copied().find(|&n| !active[n] && fits(n)));

        match chosen {
            Some(n) => {
                active[n] = true;
                cpu_remaining[n] -= pod.cpu_request;
                mem_remaining[n] -= pod.mem_request;
                assignment[pod_idx] = n as i64;
            }
            None => unplaced += 1,
        }
    }

    if unplaced > 0 {
        warn!(unplaced, "Best-fit-decreasing could not place every pod");
    }

    let cost = nodes
        .iter()
        .zip(&active)
        .filter(|(_, active)| **active)
        .map(|(node, _)| node.hourly_cost)
        .sum();
    (cost, assignment)
}

fn slack(remaining: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        remaining / capacity
    } else {
        0.0
    }
}

/// Normalized hourly cost.
///
/// The ceiling is the cost of running every node. The floor starts at the
/// Best-Fit-Decreasing estimate and follows the cheapest feasible solution
/// evaluated so far, one generation behind.
#[derive(Debug)]
pub struct CostObjective {
    nodes: Arc<[NodeInfo]>,
    normalizer: AdaptiveNormalizer,
}

impl CostObjective {
    pub fn new(pods: &[PodInfo], nodes: Arc<[NodeInfo]>) -> Self {
        let ceiling: f64 = nodes.iter().map(|n| n.hourly_cost).sum();
        let floor = best_fit_decreasing(pods, &nodes);
        info!(
            lower_bound = floor,
            upper_bound = ceiling,
            "Cost normalization bounds"
        );
        Self {
            nodes,
            normalizer: AdaptiveNormalizer::new(floor, ceiling),
        }
    }

    pub fn normalizer(&self) -> &AdaptiveNormalizer {
        &self.normalizer
    }

    pub fn raw_cost(&self, solution: &IntegerSolution) -> f64 {
        active_node_cost(solution.genes(), &self.nodes)
    }
}

impl Objective<IntegerSolution> for CostObjective {
    fn name(&self) -> &str {
        "cost"
    }

    fn evaluate(&self, solution: &IntegerSolution) -> Result<f64> {
        let raw = self.raw_cost(solution);
        self.normalizer.observe(raw);
        Ok(self.normalizer.normalize(raw))
    }

    fn probe(&self, solution: &IntegerSolution) -> Result<f64> {
        Ok(self.normalizer.normalize(self.raw_cost(solution)))
    }

    fn end_generation(&self) {
        self.normalizer.end_generation();
    }
}
