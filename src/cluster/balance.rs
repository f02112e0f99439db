//! Spread of resource utilization across nodes.

use std::sync::Arc;

use crate::cluster::model::{NodeInfo, PodInfo};
use crate::error::Result;
use crate::problem::Objective;
use crate::solution::{IntegerSolution, Solution};

/// Largest standard deviation of percentages in `[0, 100]`.
pub const MAX_STD_DEV: f64 = 50.0;

/// Weighted standard deviation of per-node CPU and memory utilization.
///
/// Utilization is measured in percent of capacity; a node with zero capacity
/// counts as 0 %. Each standard deviation is divided by [`MAX_STD_DEV`] and
/// the two are combined with equal weights, so perfectly balanced nodes
/// score 0. Genes outside `[0, nodes)` are ignored.
#[derive(Debug, Clone)]
pub struct BalanceObjective {
    pods: Arc<[PodInfo]>,
    nodes: Arc<[NodeInfo]>,
    cpu_weight: f64,
    mem_weight: f64,
}

impl BalanceObjective {
    pub fn new(pods: Arc<[PodInfo]>, nodes: Arc<[NodeInfo]>) -> Self {
        Self {
            pods,
            nodes,
            cpu_weight: 0.5,
            mem_weight: 0.5,
        }
    }

    /// Returns the CPU and memory utilization of every node in percent.
    pub fn utilization(&self, genes: &[i64]) -> Vec<(f64, f64)> {
        let mut allocated = vec![(0.0, 0.0); self.nodes.len()];
        for (pod, &gene) in self.pods.iter().zip(genes) {
            if let Some(slot) = usize::try_from(gene).ok().and_then(|n| allocated.get_mut(n)) {
                slot.0 += pod.cpu_request;
                slot.1 += pod.mem_request;
            }
        }

        self.nodes
            .iter()
            .zip(allocated)
            .map(|(node, (cpu, mem))| (percent(cpu, node.cpu_capacity), percent(mem, node.mem_capacity)))
            .collect()
    }

    pub fn score(&self, genes: &[i64]) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let utilization = self.utilization(genes);
        let cpu: Vec<f64> = utilization.iter().map(|u| u.0).collect();
        let mem: Vec<f64> = utilization.iter().map(|u| u.1).collect();

        self.cpu_weight * std_dev(&cpu) / MAX_STD_DEV + self.mem_weight * std_dev(&mem) / MAX_STD_DEV
    }
}

fn percent(allocated: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        allocated / capacity * 100.0
    } else {
        0.0
    }
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

impl Objective<IntegerSolution> for BalanceObjective {
    fn name(&self) -> &str {
        "balance"
    }

    fn evaluate(&self, solution: &IntegerSolution) -> Result<f64> {
        Ok(self.score(solution.genes()))
    }
}
