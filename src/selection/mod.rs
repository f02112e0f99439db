//! Parent selection.

pub mod tournament;

pub use tournament::{crowded_less, TournamentSelection};
