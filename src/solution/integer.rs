use crate::constraints::ConstraintSet;
use crate::operators::crossover::CrossoverKind;
use crate::operators::smart::{smart_crossover, smart_mutate};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, Solution};

/// Gene value marking a workload that has not been placed yet.
///
/// Only constructive heuristics produce it, on partial assignments. Cluster
/// objectives and constraints skip unassigned genes.
pub const UNASSIGNED: i64 = -1;

/// An integer-coded solution, typically a workload-to-node assignment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSolution {
    genes: Vec<i64>,
    bounds: Vec<Bounds<i64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    crossover: CrossoverKind,
}

impl IntegerSolution {
    /// Creates a new integer solution using uniform crossover.
    ///
    /// # Arguments
    ///
    /// * `genes` - The decision variables.
    /// * `bounds` - Inclusive bounds, one per gene.
    pub fn new(genes: Vec<i64>, bounds: Vec<Bounds<i64>>) -> Self {
        debug_assert_eq!(genes.len(), bounds.len());
        Self {
            genes,
            bounds,
            crossover: CrossoverKind::default(),
        }
    }

    /// Creates a solution with every gene set to [`UNASSIGNED`].
    pub fn unassigned(bounds: Vec<Bounds<i64>>) -> Self {
        Self::new(vec![UNASSIGNED; bounds.len()], bounds)
    }

    /// Samples every gene uniformly within its bounds.
    pub fn random(bounds: Vec<Bounds<i64>>, rng: &mut RandomNumberGenerator) -> Self {
        let genes = bounds
            .iter()
            .map(|b| rng.gen_i64_inclusive(b.low, b.high))
            .collect();
        Self::new(genes, bounds)
    }

    /// Selects the recombination operator used by [`Solution::recombine`].
    pub fn with_crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn crossover_kind(&self) -> CrossoverKind {
        self.crossover
    }

    pub fn genes_mut(&mut self) -> &mut [i64] {
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<i64> {
        self.genes
    }

    fn with_genes(&self, genes: Vec<i64>) -> Self {
        Self {
            genes,
            bounds: self.bounds.clone(),
            crossover: self.crossover,
        }
    }
}

impl Solution for IntegerSolution {
    type Gene = i64;

    fn genes(&self) -> &[i64] {
        &self.genes
    }

    fn bounds(&self) -> &[Bounds<i64>] {
        &self.bounds
    }

    fn recombine(&self, other: &Self, rng: &mut RandomNumberGenerator) -> (Self, Self) {
        let (g1, g2) = self.crossover.apply(&self.genes, &other.genes, rng);
        (self.with_genes(g1), other.with_genes(g2))
    }

    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
        for (gene, bounds) in self.genes.iter_mut().zip(&self.bounds) {
            if rng.gen_probability() < probability {
                *gene = rng.gen_i64_inclusive(bounds.low, bounds.high);
            }
        }
    }

    fn constrained_crossover(
        &self,
        other: &Self,
        probability: f64,
        constraints: &ConstraintSet<Self>,
        rng: &mut RandomNumberGenerator,
    ) -> (Self, Self) {
        smart_crossover(self, other, probability, constraints, rng)
    }

    fn constrained_mutate(
        &mut self,
        probability: f64,
        constraints: &ConstraintSet<Self>,
        rng: &mut RandomNumberGenerator,
    ) {
        smart_mutate(self, probability, constraints, rng)
    }
}
