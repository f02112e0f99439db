//! Zitzler-Deb-Thiele problems with two objectives.

use std::f64::consts::PI;
use std::sync::Arc;

use super::{unit_grid, Benchmark};
use crate::pareto::dominates;
use crate::problem::{FnObjective, Objective};
use crate::solution::{ObjectivePoint, RealSolution, Solution};

/// `g(x) = 1 + 9 * mean(x[1..])`.
fn g(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return 1.0;
    }
    1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64
}

fn zdt(name: &str, num_variables: usize, h: fn(f64, f64) -> f64, front: fn(usize, usize) -> Option<Vec<ObjectivePoint>>) -> Benchmark {
    let objectives: Vec<Arc<dyn Objective<RealSolution>>> = vec![
        Arc::new(FnObjective::new("f1", |s: &RealSolution| Ok(s.genes()[0]))),
        Arc::new(FnObjective::new("f2", move |s: &RealSolution| {
            let x = s.genes();
            let g = g(x);
            Ok(g * h(x[0], g))
        })),
    ];
    Benchmark::new(format!("{}_{}", name, num_variables), num_variables, objectives, front)
}

/// ZDT1: convex front `f2 = 1 - sqrt(f1)`.
pub fn zdt1(num_variables: usize) -> Benchmark {
    zdt("ZDT1", num_variables, |f1, g| 1.0 - (f1 / g).sqrt(), |n, _| {
        Some(unit_grid(n).map(|f1| vec![f1, 1.0 - f1.sqrt()]).collect())
    })
}

/// ZDT2: concave front `f2 = 1 - f1^2`.
pub fn zdt2(num_variables: usize) -> Benchmark {
    zdt("ZDT2", num_variables, |f1, g| 1.0 - (f1 / g).powi(2), |n, _| {
        Some(unit_grid(n).map(|f1| vec![f1, 1.0 - f1 * f1]).collect())
    })
}

/// ZDT3: disconnected front.
///
/// The reference front keeps only the non-dominated points of
/// `f2 = 1 - sqrt(f1) - f1 * sin(10 * pi * f1)` sampled over `[0, 1]`.
pub fn zdt3(num_variables: usize) -> Benchmark {
    zdt(
        "ZDT3",
        num_variables,
        |f1, g| 1.0 - (f1 / g).sqrt() - f1 / g * (10.0 * PI * f1).sin(),
        |n, _| {
            let curve: Vec<ObjectivePoint> = unit_grid(n)
                .map(|f1| vec![f1, 1.0 - f1.sqrt() - f1 * (10.0 * PI * f1).sin()])
                .collect();
            Some(
                curve
                    .iter()
                    .filter(|p| !curve.iter().any(|q| dominates(q, p)))
                    .cloned()
                    .collect(),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::solution::Bounds;

    fn solution(genes: Vec<f64>) -> RealSolution {
        let bounds = vec![Bounds::new(0.0, 1.0); genes.len()];
        RealSolution::new(genes, bounds)
    }

    #[test]
    fn test_zdt1_on_front() {
        let problem = zdt1(5);
        let point = problem.evaluate(&solution(vec![0.25, 0.0, 0.0, 0.0, 0.0]));
        assert!((point[0] - 0.25).abs() < 1e-12);
        assert!((point[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zdt2_off_front() {
        let problem = zdt2(3);
        let point = problem.evaluate(&solution(vec![0.5, 1.0, 1.0]));
        // g = 10, f2 = 10 * (1 - 0.0025)
        assert!((point[1] - 9.975).abs() < 1e-12);
    }

    #[test]
    fn test_reference_fronts() {
        let front = zdt1(30).true_pareto_front(11).unwrap();
        assert_eq!(front.len(), 11);
        assert_eq!(front[0], vec![0.0, 1.0]);
        assert_eq!(front[10], vec![1.0, 0.0]);

        let disconnected = zdt3(30).true_pareto_front(500).unwrap();
        assert!(!disconnected.is_empty() && disconnected.len() < 500);
        for p in &disconnected {
            assert!(!disconnected.iter().any(|q| dominates(q, p)));
        }
    }

    #[test]
    fn test_name_includes_dimension() {
        assert_eq!(zdt3(30).name(), "ZDT3_30");
    }
}
