//! Snapshot of the cluster handed to the optimizer.

use std::collections::HashMap;

use crate::error::{OptimizerError, Result};

/// A node that can host workloads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    pub name: String,
    /// Allocatable CPU in millicores.
    pub cpu_capacity: f64,
    /// Allocatable memory in bytes.
    pub mem_capacity: f64,
    pub hourly_cost: f64,
}

impl NodeInfo {
    pub fn new<N: Into<String>>(name: N, cpu_capacity: f64, mem_capacity: f64, hourly_cost: f64) -> Self {
        Self {
            name: name.into(),
            cpu_capacity,
            mem_capacity,
            hourly_cost,
        }
    }

    /// Capacity in normalized units: cores plus gigabytes.
    pub fn capacity_units(&self) -> f64 {
        self.cpu_capacity / 1000.0 + self.mem_capacity / 1e9
    }
}

/// A workload and its current placement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PodInfo {
    pub name: String,
    /// Index of the node currently hosting the workload.
    pub node: usize,
    /// Requested CPU in millicores.
    pub cpu_request: f64,
    /// Requested memory in bytes.
    pub mem_request: f64,
    /// Owning replica set, if any. Workloads without one are not covered by a disruption budget.
    pub replica_set: Option<String>,
    /// Replicas of the set that may be unavailable at once. Zero forbids any move.
    pub max_unavailable: u32,
    /// Seconds until a restarted replica is ready.
    pub cold_start_secs: f64,
}

impl PodInfo {
    pub fn new<N: Into<String>>(name: N, node: usize, cpu_request: f64, mem_request: f64) -> Self {
        Self {
            name: name.into(),
            node,
            cpu_request,
            mem_request,
            replica_set: None,
            max_unavailable: 1,
            cold_start_secs: 0.0,
        }
    }

    /// Places the workload in a replica set with the given budget.
    pub fn in_replica_set<N: Into<String>>(mut self, name: N, max_unavailable: u32) -> Self {
        self.replica_set = Some(name.into());
        self.max_unavailable = max_unavailable;
        self
    }

    pub fn with_cold_start(mut self, secs: f64) -> Self {
        self.cold_start_secs = secs;
        self
    }

    /// Size in normalized units: cores plus gigabytes.
    pub fn size_units(&self) -> f64 {
        self.cpu_request / 1000.0 + self.mem_request / 1e9
    }
}

/// Returns the current assignment of every workload as gene values.
pub fn current_assignment(pods: &[PodInfo]) -> Vec<i64> {
    pods.iter().map(|p| p.node as i64).collect()
}

/// Returns the disruption budget of every replica set.
///
/// Members of a set are expected to agree; when they do not, the last member
/// in pod order defines the budget.
pub fn replica_set_budgets(pods: &[PodInfo]) -> HashMap<&str, u32> {
    let mut budgets = HashMap::new();
    for pod in pods {
        if let Some(rs) = pod.replica_set.as_deref() {
            budgets.insert(rs, pod.max_unavailable);
        }
    }
    budgets
}

/// Checks that the snapshot can be optimized.
pub fn validate(nodes: &[NodeInfo], pods: &[PodInfo]) -> Result<()> {
    if nodes.is_empty() {
        return Err(OptimizerError::Configuration(
            "At least one node is required".to_string(),
        ));
    }
    if let Some(node) = nodes
        .iter()
        .find(|n| !(n.cpu_capacity.is_finite() && n.mem_capacity.is_finite() && n.hourly_cost.is_finite()))
    {
        return Err(OptimizerError::InvalidNumericValue(format!(
            "Node '{}' has a non-finite capacity or cost",
            node.name
        )));
    }
    if let Some(pod) = pods.iter().find(|p| p.node >= nodes.len()) {
        return Err(OptimizerError::Configuration(format!(
            "Pod '{}' is placed on node {} but only {} nodes exist",
            pod.name,
            pod.node,
            nodes.len()
        )));
    }
    if let Some(pod) = pods
        .iter()
        .find(|p| !(p.cpu_request.is_finite() && p.mem_request.is_finite()))
    {
        return Err(OptimizerError::InvalidNumericValue(format!(
            "Pod '{}' has a non-finite resource request",
            pod.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_nodes() {
        let pods = vec![PodInfo::new("a", 0, 100.0, 1e8)];
        assert!(matches!(
            validate(&[], &pods),
            Err(OptimizerError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_placement() {
        let nodes = vec![NodeInfo::new("n0", 1000.0, 1e9, 1.0)];
        let pods = vec![PodInfo::new("a", 1, 100.0, 1e8)];
        assert!(validate(&nodes, &pods).is_err());
    }

    #[test]
    fn test_current_assignment() {
        let pods = vec![
            PodInfo::new("a", 1, 100.0, 1e8),
            PodInfo::new("b", 0, 100.0, 1e8).in_replica_set("web", 0),
        ];
        assert_eq!(current_assignment(&pods), vec![1, 0]);
        assert_eq!(pods[1].replica_set.as_deref(), Some("web"));
        assert_eq!(pods[1].max_unavailable, 0);
    }

    #[test]
    fn test_size_units() {
        let pod = PodInfo::new("a", 0, 500.0, 2e9);
        assert!((pod.size_units() - 2.5).abs() < 1e-12);
        let node = NodeInfo::new("n", 4000.0, 16e9, 0.2);
        assert!((node.capacity_units() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_replica_set_budgets_last_member_wins() {
        let pods = vec![
            PodInfo::new("a", 0, 100.0, 1e8).in_replica_set("web", 2),
            PodInfo::new("b", 0, 100.0, 1e8),
            PodInfo::new("c", 0, 100.0, 1e8).in_replica_set("web", 0),
        ];
        let budgets = replica_set_budgets(&pods);
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets["web"], 0);
    }
}
