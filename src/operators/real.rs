//! Variation operators for real-coded genes.

use crate::rng::RandomNumberGenerator;
use crate::solution::Bounds;

/// Distribution index used by both operators. Larger values keep children closer to their parents.
pub const DISTRIBUTION_INDEX: f64 = 20.0;

/// Simulated binary crossover (SBX).
///
/// Each gene pair is recombined with probability 0.5, otherwise copied. The
/// spread factor is drawn from the polynomial distribution with index `eta`.
pub fn simulated_binary_crossover(
    p1: &[f64],
    p2: &[f64],
    bounds: &[Bounds<f64>],
    eta: f64,
    rng: &mut RandomNumberGenerator,
) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    let exponent = 1.0 / (eta + 1.0);

    for i in 0..p1.len().min(p2.len()) {
        if rng.gen_probability() >= 0.5 {
            continue;
        }
        let u = rng.gen_probability();
        let beta = if u <= 0.5 {
            (2.0 * u).powf(exponent)
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(exponent)
        };

        let v1 = 0.5 * ((1.0 + beta) * p1[i] + (1.0 - beta) * p2[i]);
        let v2 = 0.5 * ((1.0 - beta) * p1[i] + (1.0 + beta) * p2[i]);
        c1[i] = bounds[i].clamp(v1);
        c2[i] = bounds[i].clamp(v2);
    }

    (c1, c2)
}

/// Polynomial mutation, applied to each gene with the given probability.
pub fn polynomial_mutation(
    genes: &mut [f64],
    bounds: &[Bounds<f64>],
    probability: f64,
    eta: f64,
    rng: &mut RandomNumberGenerator,
) {
    let exponent = 1.0 / (eta + 1.0);
    for (gene, b) in genes.iter_mut().zip(bounds) {
        if rng.gen_probability() >= probability {
            continue;
        }
        let u = rng.gen_probability();
        let delta = if u < 0.5 {
            (2.0 * u).powf(exponent) - 1.0
        } else {
            1.0 - (2.0 * (1.0 - u)).powf(exponent)
        };
        *gene = b.clamp(*gene + delta * (b.high - b.low));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sbx_identical_parents_produce_identical_children() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let parent = vec![0.3, 0.6, 0.9];
        let bounds = vec![Bounds::new(0.0, 1.0); 3];
        let (c1, c2) = simulated_binary_crossover(&parent, &parent, &bounds, 20.0, &mut rng);
        for ((a, b), p) in c1.iter().zip(&c2).zip(&parent) {
            assert!((a - p).abs() < 1e-12);
            assert!((b - p).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sbx_preserves_gene_sum() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let p1 = vec![0.2; 8];
        let p2 = vec![0.4; 8];
        let bounds = vec![Bounds::new(0.0, 1.0); 8];
        let (c1, c2) = simulated_binary_crossover(&p1, &p2, &bounds, 20.0, &mut rng);
        // Without clamping, SBX children are symmetric around the parents' mean.
        for (a, b) in c1.iter().zip(&c2) {
            assert!((a + b - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_polynomial_mutation_zero_probability() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut genes = vec![0.1, 0.5, 0.9];
        polynomial_mutation(&mut genes, &[Bounds::new(0.0, 1.0); 3], 0.0, 20.0, &mut rng);
        assert_eq!(genes, vec![0.1, 0.5, 0.9]);
    }
}
