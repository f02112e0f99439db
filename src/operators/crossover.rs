//! # Integer crossover family
//!
//! Encoding-agnostic recombination of two integer gene vectors of equal
//! length. Every operator returns two children; gene `i` of a child always
//! comes from gene `i` of one of the parents.
//!
//! `node_aware` is specific to assignment encodings: genes sharing a value in
//! the first parent (workloads co-located on one node) are inherited together.
//!
//! ```rust
//! use rebalance::operators::crossover::{k_point, CrossoverKind};
//! use rebalance::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let (c1, c2) = k_point(&[0; 10], &[1; 10], 3, &mut rng);
//! assert_eq!(c1.iter().zip(&c2).filter(|(a, b)| a == b).count(), 0);
//!
//! let (c1, _) = CrossoverKind::TwoPoint.apply(&[0; 4], &[1; 4], &mut rng);
//! assert_eq!(c1.len(), 4);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::rng::RandomNumberGenerator;

/// Selects the recombination operator of an [`IntegerSolution`](crate::solution::IntegerSolution).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverKind {
    OnePoint,
    TwoPoint,
    #[default]
    Uniform,
    KPoint(usize),
    NodeAware,
}

impl CrossoverKind {
    /// Recombines two parents with this operator.
    pub fn apply(
        &self,
        p1: &[i64],
        p2: &[i64],
        rng: &mut RandomNumberGenerator,
    ) -> (Vec<i64>, Vec<i64>) {
        match self {
            CrossoverKind::OnePoint => one_point(p1, p2, rng),
            CrossoverKind::TwoPoint => two_point(p1, p2, rng),
            CrossoverKind::Uniform => uniform(p1, p2, rng),
            CrossoverKind::KPoint(k) => k_point(p1, p2, *k, rng),
            CrossoverKind::NodeAware => node_aware(p1, p2, rng),
        }
    }
}

/// Builds both children from a per-gene choice: `true` takes gene `i` of `p1` for the first child.
fn assemble(p1: &[i64], p2: &[i64], mut keep: impl FnMut(usize) -> bool) -> (Vec<i64>, Vec<i64>) {
    let len = p1.len().min(p2.len());
    let mut c1 = Vec::with_capacity(len);
    let mut c2 = Vec::with_capacity(len);
    for i in 0..len {
        if keep(i) {
            c1.push(p1[i]);
            c2.push(p2[i]);
        } else {
            c1.push(p2[i]);
            c2.push(p1[i]);
        }
    }
    (c1, c2)
}

/// Single random cut: genes before the cut come from the own parent, the rest from the other.
pub fn one_point(p1: &[i64], p2: &[i64], rng: &mut RandomNumberGenerator) -> (Vec<i64>, Vec<i64>) {
    if p1.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let point = rng.gen_index(p1.len());
    assemble(p1, p2, |i| i < point)
}

/// Two random cuts. The segment between them is exchanged.
pub fn two_point(p1: &[i64], p2: &[i64], rng: &mut RandomNumberGenerator) -> (Vec<i64>, Vec<i64>) {
    if p1.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let a = rng.gen_index(p1.len());
    let b = rng.gen_index(p1.len());
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    assemble(p1, p2, |i| i < start || i >= end)
}

/// Each gene is taken from either parent with probability 0.5.
pub fn uniform(p1: &[i64], p2: &[i64], rng: &mut RandomNumberGenerator) -> (Vec<i64>, Vec<i64>) {
    assemble(p1, p2, |_| rng.gen_probability() < 0.5)
}

/// `k` distinct cut points split the vectors into `k + 1` alternating segments.
///
/// `k` is clamped to `len - 1`, the number of available cut positions.
pub fn k_point(
    p1: &[i64],
    p2: &[i64],
    k: usize,
    rng: &mut RandomNumberGenerator,
) -> (Vec<i64>, Vec<i64>) {
    let len = p1.len().min(p2.len());
    if len < 2 || k == 0 {
        return (p1[..len].to_vec(), p2[..len].to_vec());
    }

    let k = k.min(len - 1);
    let mut positions: Vec<usize> = (1..len).collect();
    rng.shuffle(&mut positions);
    let cuts: BTreeSet<usize> = positions.into_iter().take(k).collect();

    let mut swapped = false;
    assemble(p1, p2, |i| {
        if cuts.contains(&i) {
            swapped = !swapped;
        }
        !swapped
    })
}

/// Inherits groups of co-located genes as units.
///
/// Genes are grouped by their value in `p1`. For each group, the first child
/// takes all of its genes from `p1` or all of them from `p2`.
pub fn node_aware(p1: &[i64], p2: &[i64], rng: &mut RandomNumberGenerator) -> (Vec<i64>, Vec<i64>) {
    let len = p1.len().min(p2.len());
    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &node) in p1[..len].iter().enumerate() {
        groups.entry(node).or_default().push(i);
    }

    let mut keep = vec![true; len];
    for members in groups.values() {
        let from_first = rng.gen_probability() < 0.5;
        for &i in members {
            keep[i] = from_first;
        }
    }

    assemble(p1, p2, |i| keep[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_gene_provenance(p1: &[i64], p2: &[i64], c1: &[i64], c2: &[i64]) {
        for i in 0..p1.len() {
            let straight = c1[i] == p1[i] && c2[i] == p2[i];
            let crossed = c1[i] == p2[i] && c2[i] == p1[i];
            assert!(straight || crossed, "gene {} has no parent", i);
        }
    }

    #[test]
    fn test_all_operators_take_genes_from_parents() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let p1: Vec<i64> = (0..12).collect();
        let p2: Vec<i64> = (100..112).collect();

        for kind in [
            CrossoverKind::OnePoint,
            CrossoverKind::TwoPoint,
            CrossoverKind::Uniform,
            CrossoverKind::KPoint(4),
            CrossoverKind::NodeAware,
        ] {
            let (c1, c2) = kind.apply(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), p1.len());
            assert_gene_provenance(&p1, &p2, &c1, &c2);
        }
    }

    #[test]
    fn test_k_point_alternates_segments() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let (c1, _) = k_point(&[0; 20], &[1; 20], 3, &mut rng);

        let switches = c1.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(switches, 3);
        assert_eq!(c1[0], 0);
    }

    #[test]
    fn test_k_point_clamps_k() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let (c1, _) = k_point(&[0; 3], &[1; 3], 10, &mut rng);
        assert_eq!(c1, vec![0, 1, 0]);
    }

    #[test]
    fn test_two_point_exchanges_a_contiguous_segment() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        for _ in 0..20 {
            let (c1, _) = two_point(&[0; 10], &[1; 10], &mut rng);
            let first = c1.iter().position(|&g| g == 1);
            if let Some(start) = first {
                let end = c1[start..].iter().position(|&g| g == 0).map_or(10, |p| start + p);
                assert!(c1[end..].iter().all(|&g| g == 0));
            }
        }
    }

    #[test]
    fn test_node_aware_keeps_groups_together() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let p1 = vec![0, 0, 1, 1, 2, 2, 0];
        let p2 = vec![5, 6, 7, 8, 9, 10, 11];

        for _ in 0..20 {
            let (c1, _) = node_aware(&p1, &p2, &mut rng);
            for node in 0..3 {
                let members: Vec<usize> = (0..p1.len()).filter(|&i| p1[i] == node).collect();
                let inherited = members.iter().filter(|&&i| c1[i] == p1[i]).count();
                assert!(inherited == 0 || inherited == members.len());
            }
        }
    }
}
