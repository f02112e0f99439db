//! Deb-Thiele-Laumanns-Zitzler problems with a scalable number of objectives.
//!
//! The last `num_variables - num_objectives + 1` variables form the distance
//! vector `x_M` fed to `g`; the first `num_objectives - 1` position the point
//! on the front.

use std::f64::consts::PI;
use std::sync::Arc;

use super::{unit_grid, Benchmark};
use crate::problem::{FnObjective, Objective};
use crate::solution::{ObjectivePoint, RealSolution, Solution};

fn dtlz(
    name: &str,
    num_variables: usize,
    num_objectives: usize,
    objective: fn(&[f64], usize, usize) -> f64,
    front: fn(usize, usize) -> Option<Vec<ObjectivePoint>>,
) -> Benchmark {
    let objectives: Vec<Arc<dyn Objective<RealSolution>>> = (0..num_objectives)
        .map(|i| -> Arc<dyn Objective<RealSolution>> {
            Arc::new(FnObjective::new(format!("f{}", i + 1), move |s: &RealSolution| {
                Ok(objective(s.genes(), i, num_objectives))
            }))
        })
        .collect();
    Benchmark::new(
        format!("{}_{}_{}", name, num_variables, num_objectives),
        num_variables,
        objectives,
        front,
    )
}

fn distance_vector(x: &[f64], m: usize) -> &[f64] {
    &x[(m - 1).min(x.len())..]
}

/// DTLZ1: linear front `sum(f) = 0.5`, with a highly multi-modal `g`.
pub fn dtlz1(num_variables: usize, num_objectives: usize) -> Benchmark {
    dtlz("DTLZ1", num_variables, num_objectives, dtlz1_objective, dtlz1_front)
}

fn dtlz1_objective(x: &[f64], i: usize, m: usize) -> f64 {
    let xm = distance_vector(x, m);
    let g = 100.0
        * (xm.len() as f64
            + xm
                .iter()
                .map(|&v| (v - 0.5).powi(2) - (20.0 * PI * (v - 0.5)).cos())
                .sum::<f64>());

    let mut f = 0.5 * (1.0 + g);
    f *= x[..m - 1 - i].iter().product::<f64>();
    if i > 0 {
        f *= 1.0 - x[m - 1 - i];
    }
    f
}

fn dtlz1_front(n: usize, m: usize) -> Option<Vec<ObjectivePoint>> {
    match m {
        2 => Some(unit_grid(n).map(|t| vec![0.5 * t, 0.5 * (1.0 - t)]).collect()),
        3 => {
            let divisions = simplex_divisions(n);
            let mut points = Vec::new();
            for i in 0..=divisions {
                for j in 0..=divisions - i {
                    let k = divisions - i - j;
                    let scale = 0.5 / divisions as f64;
                    points.push(vec![i as f64 * scale, j as f64 * scale, k as f64 * scale]);
                }
            }
            Some(points)
        }
        _ => None,
    }
}

/// Largest simplex lattice resolution with at most `n` points on a triangle.
fn simplex_divisions(n: usize) -> usize {
    let mut divisions = 1;
    while (divisions + 2) * (divisions + 3) / 2 <= n {
        divisions += 1;
    }
    divisions
}

/// DTLZ2: spherical front `sum(f^2) = 1`.
pub fn dtlz2(num_variables: usize, num_objectives: usize) -> Benchmark {
    dtlz("DTLZ2", num_variables, num_objectives, dtlz2_objective, dtlz2_front)
}

fn dtlz2_objective(x: &[f64], i: usize, m: usize) -> f64 {
    let g: f64 = distance_vector(x, m).iter().map(|&v| (v - 0.5).powi(2)).sum();

    let mut f = 1.0 + g;
    f *= x[..m - 1 - i]
        .iter()
        .map(|&v| (v * PI / 2.0).cos())
        .product::<f64>();
    if i > 0 {
        f *= (x[m - 1 - i] * PI / 2.0).sin();
    }
    f
}

fn dtlz2_front(n: usize, m: usize) -> Option<Vec<ObjectivePoint>> {
    match m {
        2 => Some(
            unit_grid(n)
                .map(|t| {
                    let theta = t * PI / 2.0;
                    vec![theta.cos(), theta.sin()]
                })
                .collect(),
        ),
        3 => {
            let side = (n as f64).sqrt() as usize;
            let mut points = Vec::with_capacity(side * side);
            for a in unit_grid(side) {
                for b in unit_grid(side) {
                    let (theta, phi) = (a * PI / 2.0, b * PI / 2.0);
                    points.push(vec![theta.cos() * phi.cos(), theta.sin() * phi.cos(), phi.sin()]);
                }
            }
            Some(points)
        }
        _ => None,
    }
}
