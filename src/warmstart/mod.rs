//! # Warm start
//!
//! Constructive generation of an initial population. Random sampling over
//! node indices mostly yields infeasible or poor assignments when capacity is
//! tight; the greedy constructive state heuristic (GCSH) instead builds a
//! feasibility-biased population spread across the trade-off between the
//! construction objectives.

pub mod gcsh;

pub use gcsh::{weight_vectors, Gcsh, GcshConfig};
