use std::sync::Arc;

use rebalance::{
    benchmarks::{dtlz2, zdt1, zdt2},
    constraints::{ConstraintSet, FnConstraint},
    error::OptimizerError,
    evolution::{LogLevel, Nsga2, Nsga2Options},
    pareto::{dominates, first_front, inverted_generational_distance, non_dominated_sort},
    problem::{FnObjective, Objective, Problem},
    rng::RandomNumberGenerator,
    solution::{Bounds, IntegerSolution, Solution},
};

fn options(population_size: usize, num_generations: usize) -> Nsga2Options {
    Nsga2Options::builder()
        .population_size(population_size)
        .num_generations(num_generations)
        .seed(2024)
        .log_level(LogLevel::None)
        .build()
}

/// Places `items` items into 4 bins of capacity 3, minimizing the number of
/// bins used and the number of items left in bin 0.
struct Packing {
    items: usize,
    objectives: Vec<Arc<dyn Objective<IntegerSolution>>>,
    constraints: ConstraintSet<IntegerSolution>,
}

impl Packing {
    fn new(items: usize) -> Self {
        let bins: Arc<dyn Objective<IntegerSolution>> =
            Arc::new(FnObjective::new("bins", |s: &IntegerSolution| {
                let mut used = [false; 4];
                for &g in s.genes() {
                    used[g as usize] = true;
                }
                Ok(used.iter().filter(|u| **u).count() as f64)
            }));
        let in_first: Arc<dyn Objective<IntegerSolution>> =
            Arc::new(FnObjective::new("in_first", |s: &IntegerSolution| {
                Ok(s.genes().iter().filter(|&&g| g == 0).count() as f64)
            }));

        Self {
            items,
            objectives: vec![bins, in_first],
            constraints: ConstraintSet::builder()
                .with_constraint(FnConstraint::new("capacity", |s: &IntegerSolution| {
                    (0..4).all(|bin| s.genes().iter().filter(|&&g| g == bin).count() <= 3)
                }))
                .build(),
        }
    }
}

impl Problem for Packing {
    type Solution = IntegerSolution;

    fn name(&self) -> &str {
        "Packing"
    }

    fn objectives(&self) -> &[Arc<dyn Objective<IntegerSolution>>] {
        &self.objectives
    }

    fn constraints(&self) -> &ConstraintSet<IntegerSolution> {
        &self.constraints
    }

    fn bounds(&self) -> Vec<Bounds<i64>> {
        vec![Bounds::new(0, 3); self.items]
    }

    fn initialize(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<IntegerSolution> {
        // A round-robin placement is always feasible; shuffle it for diversity.
        (0..n)
            .map(|_| {
                let mut genes: Vec<i64> = (0..self.items).map(|i| (i % 4) as i64).collect();
                rng.shuffle(&mut genes);
                IntegerSolution::new(genes, self.bounds())
            })
            .collect()
    }
}

#[test]
fn test_population_size_is_invariant() {
    for (size, generations) in [(2, 0), (3, 5), (7, 3), (16, 10)] {
        let engine = Nsga2::new(zdt1(8), options(size, generations)).unwrap();
        let population = engine.run().unwrap();
        assert_eq!(population.len(), size);
    }
}

#[test]
fn test_final_population_fronts_are_consistent() {
    let engine = Nsga2::new(zdt2(10), options(30, 15)).unwrap();
    let mut population = engine.run().unwrap();
    let fronts = non_dominated_sort(&mut population);

    for pair in fronts.windows(2) {
        for &i in &pair[1] {
            assert!(pair[0]
                .iter()
                .any(|&j| dominates(&population[j].objectives, &population[i].objectives)));
        }
    }
    for front in &fronts {
        for &i in front {
            for &j in front {
                assert!(!dominates(&population[i].objectives, &population[j].objectives));
            }
        }
    }
}

#[test]
fn test_zdt1_converges() {
    let problem = zdt1(10);
    let reference = problem.true_pareto_front(200).unwrap();

    let early = Nsga2::new(zdt1(10), options(60, 5)).unwrap();
    let early_front = early.pareto_front(&early.run().unwrap());

    let late = Nsga2::new(problem, options(60, 120)).unwrap();
    let late_front = late.pareto_front(&late.run().unwrap());

    let early_igd = inverted_generational_distance(&early_front, &reference).unwrap();
    let late_igd = inverted_generational_distance(&late_front, &reference).unwrap();
    assert!(late_igd < early_igd, "{} >= {}", late_igd, early_igd);
    assert!(late_igd < 0.2, "IGD {}", late_igd);
}

#[test]
fn test_dtlz2_front_stays_near_sphere() {
    let engine = Nsga2::new(dtlz2(7, 2), options(40, 80)).unwrap();
    let population = engine.run().unwrap();
    for point in engine.pareto_front(&population) {
        let radius = point.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!(radius < 1.5, "radius {}", radius);
    }
}

#[test]
fn test_fixed_seed_is_reproducible_across_modes() {
    let run = |parallel: bool| {
        let mut options = options(24, 12);
        options.set_parallel(parallel);
        let population = Nsga2::new(Packing::new(8), options).unwrap().run().unwrap();
        population
            .into_iter()
            .map(|i| i.solution.into_genes())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(true), run(false));
    assert_eq!(run(true), run(true));
}

#[test]
fn test_constrained_integer_problem_stays_feasible() {
    let problem = Packing::new(9);
    let engine = Nsga2::new(problem, options(20, 25)).unwrap();
    let population = engine.run().unwrap();

    for individual in &population {
        assert!(individual.solution.is_within_bounds());
        assert!(engine.problem().constraints().is_feasible(&individual.solution));
        assert!(!individual.is_penalized());
    }

    // Nine items need at least three bins of capacity three.
    let front = first_front(&population);
    assert!(!front.is_empty());
    assert!(front.iter().all(|i| i.objectives[0] >= 3.0));
}

#[test]
fn test_invalid_configuration() {
    let mut options = options(10, 1);
    options.set_tournament_size(1);
    assert!(matches!(
        Nsga2::new(zdt1(4), options),
        Err(OptimizerError::Configuration(_))
    ));
}
