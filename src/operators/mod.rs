//! Variation operators: integer crossover family, constraint-aware
//! operators and real-coded SBX / polynomial mutation.

pub mod crossover;
pub mod real;
pub mod smart;

pub use crossover::CrossoverKind;
pub use smart::{smart_crossover, smart_mutate};
