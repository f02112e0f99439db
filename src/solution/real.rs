use crate::operators::real::{polynomial_mutation, simulated_binary_crossover, DISTRIBUTION_INDEX};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Bounds, Solution};

/// A real-coded solution used by continuous test problems.
///
/// Recombination is simulated binary crossover and mutation is polynomial
/// mutation, both with a distribution index of 20. Children are always clamped
/// back into bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RealSolution {
    genes: Vec<f64>,
    bounds: Vec<Bounds<f64>>,
}

impl RealSolution {
    pub fn new(genes: Vec<f64>, bounds: Vec<Bounds<f64>>) -> Self {
        debug_assert_eq!(genes.len(), bounds.len());
        Self { genes, bounds }
    }

    /// Samples every gene uniformly within its bounds.
    pub fn random(bounds: Vec<Bounds<f64>>, rng: &mut RandomNumberGenerator) -> Self {
        let genes = bounds.iter().map(|b| rng.gen_f64(b.low, b.high)).collect();
        Self::new(genes, bounds)
    }
}

impl Solution for RealSolution {
    type Gene = f64;

    fn genes(&self) -> &[f64] {
        &self.genes
    }

    fn bounds(&self) -> &[Bounds<f64>] {
        &self.bounds
    }

    fn recombine(&self, other: &Self, rng: &mut RandomNumberGenerator) -> (Self, Self) {
        let (g1, g2) = simulated_binary_crossover(
            &self.genes,
            &other.genes,
            &self.bounds,
            DISTRIBUTION_INDEX,
            rng,
        );
        (
            Self::new(g1, self.bounds.clone()),
            Self::new(g2, other.bounds.clone()),
        )
    }

    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
        polynomial_mutation(
            &mut self.genes,
            &self.bounds,
            probability,
            DISTRIBUTION_INDEX,
            rng,
        );
    }
}
