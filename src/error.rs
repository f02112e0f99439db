//! # Error Types
//!
//! This module defines the error type shared by the whole optimizer. Only a
//! small part of what can go wrong during a run is ever surfaced as an error:
//! infeasible solutions, failing objective functions and operators that cannot
//! find a feasible move are all absorbed into the numeric machinery (penalty
//! objective values, unchanged genes). What remains are configuration and
//! initialization problems that make a run impossible.
//!
//! ## Examples
//!
//! ```rust
//! use rebalance::error::{OptimizerError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size < 2 {
//!         return Err(OptimizerError::Configuration(
//!             "Population size must be at least 2".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(1).is_err());
//! assert!(check_population(10).is_ok());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the optimizer.
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The problem's initializer did not produce the requested number of solutions.
    ///
    /// This is fatal: the engine cannot run with a population of the wrong size.
    #[error("Initialization error: expected {expected} solutions, initializer produced {actual}")]
    Initialization { expected: usize, actual: usize },

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// An objective-space point does not have the expected dimensionality.
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An objective function failed for a particular solution.
    ///
    /// The engine never propagates this; it is converted to a `+inf` penalty.
    #[error("Objective evaluation error: {0}")]
    Evaluation(String),

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_error_message() {
        let err = OptimizerError::Initialization {
            expected: 10,
            actual: 7,
        };
        let message = err.to_string();
        assert!(message.contains("expected 10"));
        assert!(message.contains("produced 7"));
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = OptimizerError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3 values, got 2");
    }
}
