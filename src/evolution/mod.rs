//! # Evolution
//!
//! The NSGA-II engine, its configuration and the population types it works on.

pub mod engine;
pub mod individual;
pub mod options;

pub use engine::{environmental_selection, Nsga2};
pub use individual::{Individual, Population};
pub use options::{LogLevel, Nsga2Options, Nsga2OptionsBuilder};
