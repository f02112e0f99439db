use tracing::info;

use super::{dtlz1, dtlz2, zdt1, zdt2, zdt3, Benchmark, REFERENCE_FRONT_POINTS};
use crate::error::Result;
use crate::evolution::{Nsga2, Nsga2Options};
use crate::pareto::inverted_generational_distance;
use crate::problem::Problem;

/// Outcome of one benchmark run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub name: String,
    /// Number of points in the obtained first front.
    pub front_size: usize,
    /// Inverted generational distance to the true front, when one is known.
    pub igd: Option<f64>,
}

/// Runs NSGA-II with one configuration over a list of benchmark problems.
#[derive(Debug, Clone)]
pub struct BenchmarkSuite {
    options: Nsga2Options,
    problems: Vec<Benchmark>,
}

impl BenchmarkSuite {
    pub fn new(options: Nsga2Options) -> Self {
        Self {
            options,
            problems: Vec::new(),
        }
    }

    /// ZDT1-3 with 30 variables, DTLZ1 and DTLZ2 with two and three objectives.
    pub fn standard(options: Nsga2Options) -> Self {
        let mut suite = Self::new(options);
        suite.add_problem(zdt1(30));
        suite.add_problem(zdt2(30));
        suite.add_problem(zdt3(30));
        suite.add_problem(dtlz1(7, 2));
        suite.add_problem(dtlz2(12, 2));
        suite.add_problem(dtlz1(8, 3));
        suite.add_problem(dtlz2(13, 3));
        suite
    }

    pub fn add_problem(&mut self, problem: Benchmark) {
        self.problems.push(problem);
    }

    pub fn problems(&self) -> &[Benchmark] {
        &self.problems
    }

    /// Runs every problem in order.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error raised by the engine.
    pub fn run(&self) -> Result<Vec<BenchmarkReport>> {
        self.problems
            .iter()
            .map(|problem| {
                info!(problem = problem.name(), "Running benchmark");
                let reference = problem.true_pareto_front(REFERENCE_FRONT_POINTS);

                let engine = Nsga2::new(problem.clone(), self.options.clone())?;
                let population = engine.run()?;
                let front = engine.pareto_front(&population);

                let igd = reference
                    .map(|reference| inverted_generational_distance(&front, &reference))
                    .transpose()?;
                info!(
                    problem = problem.name(),
                    front_size = front.len(),
                    igd = ?igd,
                    "Benchmark finished"
                );

                Ok(BenchmarkReport {
                    name: problem.name().to_string(),
                    front_size: front.len(),
                    igd,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::LogLevel;

    #[test]
    fn test_standard_suite_contents() {
        let suite = BenchmarkSuite::standard(Nsga2Options::default());
        let names: Vec<&str> = suite.problems().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "ZDT1_30",
                "ZDT2_30",
                "ZDT3_30",
                "DTLZ1_7_2",
                "DTLZ2_12_2",
                "DTLZ1_8_3",
                "DTLZ2_13_3"
            ]
        );
    }

    #[test]
    fn test_run_reports_igd() {
        let options = Nsga2Options::builder()
            .population_size(20)
            .num_generations(10)
            .seed(11)
            .log_level(LogLevel::None)
            .build();
        let mut suite = BenchmarkSuite::new(options);
        suite.add_problem(zdt1(6));
        suite.add_problem(dtlz2(5, 2));

        let reports = suite.run().unwrap();
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(report.front_size > 0);
            assert!(report.igd.is_some_and(|igd| igd.is_finite() && igd >= 0.0));
        }
    }
}
