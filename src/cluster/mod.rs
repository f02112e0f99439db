//! # Cluster rebalancing
//!
//! The workload placement problem: a snapshot model of nodes and pods, the
//! cost, disruption and balance objectives, the [`ClusterProblem`] tying them
//! to the resource and disruption-budget constraints, and the ranking of a
//! final front into executable candidates.
//!
//! ## Example
//!
//! ```rust
//! use rebalance::cluster::{rebalance, NodeInfo, PodInfo, WeightConfig};
//! use rebalance::evolution::Nsga2Options;
//!
//! let nodes = vec![
//!     NodeInfo::new("a", 4000.0, 8e9, 1.0),
//!     NodeInfo::new("b", 4000.0, 8e9, 1.0),
//! ];
//! let pods = vec![
//!     PodInfo::new("web-0", 0, 500.0, 1e9).in_replica_set("web", 1),
//!     PodInfo::new("web-1", 1, 500.0, 1e9).in_replica_set("web", 1),
//! ];
//! let options = Nsga2Options::builder()
//!     .population_size(8)
//!     .num_generations(5)
//!     .parallel(false)
//!     .seed(1)
//!     .build();
//!
//! let candidates = rebalance(nodes, pods, options, &WeightConfig::default(), Vec::new()).unwrap();
//! assert!(!candidates.is_empty());
//! assert!(candidates.windows(2).all(|w| w[0].weighted_score <= w[1].weighted_score));
//! ```

pub mod balance;
pub mod cost;
pub mod disruption;
pub mod model;
pub mod plan;
pub mod problem;

pub use balance::BalanceObjective;
pub use cost::{best_fit_decreasing, best_fit_decreasing_assignment, CostObjective};
pub use disruption::{DisruptionBreakdown, DisruptionObjective, PenaltyShape};
pub use model::{NodeInfo, PodInfo};
pub use plan::{feasible_movements, rank_front, rebalance, RankedAssignment, WeightConfig};
pub use problem::{ClusterProblem, SeededProblem};
