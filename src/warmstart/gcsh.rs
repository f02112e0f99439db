use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cluster::model::{current_assignment, NodeInfo, PodInfo};
use crate::constraints::ConstraintSet;
use crate::problem::Objective;
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, IntegerSolution, Solution, UNASSIGNED};

/// Relative jitter applied to workload sizes when ordering them.
const ORDER_JITTER: f64 = 0.2;

/// Builds `count` weight vectors over `num_objectives` objectives.
///
/// The vectors sweep linearly from all weight on the first objective to all
/// weight on the second; any further objectives get weight 0. A single vector
/// spreads the weight equally.
///
/// ```rust
/// use rebalance::warmstart::weight_vectors;
///
/// let weights = weight_vectors(3, 2);
/// assert_eq!(weights, vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]]);
/// assert_eq!(weight_vectors(1, 2), vec![vec![0.5, 0.5]]);
/// ```
pub fn weight_vectors(count: usize, num_objectives: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|i| {
            if num_objectives == 0 {
                return Vec::new();
            }
            if count == 1 {
                return vec![1.0 / num_objectives as f64; num_objectives];
            }
            let mut weights = vec![0.0; num_objectives];
            if num_objectives == 1 {
                weights[0] = 1.0;
                return weights;
            }
            let t = i as f64 / (count - 1) as f64;
            weights[0] = 1.0 - t;
            weights[1] = t;
            weights
        })
        .collect()
}

/// Inputs of the constructive heuristic.
#[derive(Clone)]
pub struct GcshConfig {
    pub pods: Arc<[PodInfo]>,
    pub nodes: Arc<[NodeInfo]>,
    /// Objectives scored during construction. Disruption is not one of them.
    pub objectives: Vec<Arc<dyn Objective<IntegerSolution>>>,
    pub constraints: ConstraintSet<IntegerSolution>,
    /// Prepend the unchanged current placement as a zero-disruption baseline.
    pub include_current_state: bool,
}

/// Greedy constructive state heuristic.
///
/// Builds one assignment per weight vector: workloads are placed largest
/// first, each on the feasible node with the lowest weighted objective score
/// for the partial assignment.
pub struct Gcsh {
    config: GcshConfig,
}

#[derive(Clone, Copy)]
struct Remaining {
    cpu: f64,
    mem: f64,
}

impl Remaining {
    fn fits(&self, pod: &PodInfo) -> bool {
        self.cpu >= pod.cpu_request && self.mem >= pod.mem_request
    }

    fn units(&self) -> f64 {
        self.cpu / 1000.0 + self.mem / 1e9
    }
}

impl Gcsh {
    pub fn new(config: GcshConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GcshConfig {
        &self.config
    }

    fn bounds(&self) -> Vec<Bounds<i64>> {
        let high = self.config.nodes.len() as i64 - 1;
        vec![Bounds::new(0, high); self.config.pods.len()]
    }

    /// Returns the current placement as a solution.
    pub fn current_state_solution(&self) -> IntegerSolution {
        IntegerSolution::new(current_assignment(&self.config.pods), self.bounds())
    }

    /// Generates exactly `n` solutions.
    ///
    /// When the current state is included it comes first and `n - 1`
    /// solutions are constructed; otherwise all `n` are.
    pub fn generate_initial_population(
        &self,
        n: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<IntegerSolution> {
        let mut solutions = Vec::with_capacity(n);
        if self.config.include_current_state && n > 0 {
            solutions.push(self.current_state_solution());
            debug!("Added current state as zero-disruption baseline");
        }

        let weights = weight_vectors(n - solutions.len(), self.config.objectives.len());
        for w in &weights {
            solutions.push(self.construct(w, rng));
        }

        let unique: HashSet<&[i64]> = solutions.iter().map(|s| s.genes()).collect();
        info!(
            generated = solutions.len(),
            unique = unique.len(),
            "GCSH generated initial solutions"
        );
        solutions
    }

    /// Constructs one complete assignment for the given weight vector.
    pub fn construct(&self, weights: &[f64], rng: &mut RandomNumberGenerator) -> IntegerSolution {
        let pods = &self.config.pods;
        let nodes = &self.config.nodes;
        let mut solution = IntegerSolution::unassigned(self.bounds());
        if nodes.is_empty() {
            return solution;
        }

        let mut order: Vec<(usize, f64)> = pods
            .iter()
            .enumerate()
            .map(|(i, pod)| {
                let jitter = 1.0 - ORDER_JITTER + rng.gen_probability() * 2.0 * ORDER_JITTER;
                (i, pod.size_units() * jitter)
            })
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut remaining: Vec<Remaining> = nodes
            .iter()
            .map(|n| Remaining {
                cpu: n.cpu_capacity,
                mem: n.mem_capacity,
            })
            .collect();

        for (pod_idx, _) in order {
            let pod = &pods[pod_idx];
            let mut best: Option<(usize, f64)> = None;

            for node_idx in 0..nodes.len() {
                if !remaining[node_idx].fits(pod) {
                    continue;
                }
                solution.genes_mut()[pod_idx] = node_idx as i64;
                if self.config.constraints.is_feasible(&solution) {
                    let score = self.score(&solution, weights);
                    if best.map_or(score < f64::INFINITY, |(_, s)| score < s) {
                        best = Some((node_idx, score));
                    }
                }
                solution.genes_mut()[pod_idx] = UNASSIGNED;
            }

            let chosen = match best {
                Some((node_idx, _)) => node_idx,
                None => match remaining.iter().position(|r| r.fits(pod)) {
                    Some(node_idx) => node_idx,
                    None => {
                        let node_idx = most_headroom(&remaining);
                        warn!(
                            pod = %pod.name,
                            node = %nodes[node_idx].name,
                            "No node has capacity for pod, placing on node with most headroom"
                        );
                        node_idx
                    }
                },
            };

            solution.genes_mut()[pod_idx] = chosen as i64;
            if best.is_none() {
                for violation in self.config.constraints.check_all(&solution) {
                    debug!(pod = %pod.name, %violation, "Fallback placement violates a constraint");
                }
            }
            remaining[chosen].cpu -= pod.cpu_request;
            remaining[chosen].mem -= pod.mem_request;
        }

        solution
    }

    /// Weighted sum of the construction objectives on a partial assignment.
    fn score(&self, solution: &IntegerSolution, weights: &[f64]) -> f64 {
        self.config
            .objectives
            .iter()
            .zip(weights)
            .filter(|(_, w)| **w != 0.0)
            .map(|(objective, w)| match objective.probe(solution) {
                Ok(v) if v.is_finite() => w * v,
                _ => f64::INFINITY,
            })
            .sum()
    }
}

fn most_headroom(remaining: &[Remaining]) -> usize {
    remaining
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.units().total_cmp(&b.1.units()))
        .map_or(0, |(i, _)| i)
}
