pub mod benchmarks;
pub mod cluster;
pub mod constraints;
pub mod error;
pub mod evolution;
pub mod normalization;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod rng;
pub mod selection;
pub mod solution;
pub mod warmstart;

// Re-export commonly used types for convenience
pub use error::{OptimizerError, Result};
pub use evolution::{Individual, Nsga2, Nsga2Options, Population};
pub use problem::{Objective, Problem};
pub use solution::{Bounds, IntegerSolution, ObjectivePoint, RealSolution, Solution};
