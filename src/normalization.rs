//! # Objective normalization
//!
//! Raw objective magnitudes (hourly cost, for instance) vary by orders of
//! magnitude between problem instances. Normalization maps them with Deb's
//! scheme `(raw - min) / (max - min)`.
//!
//! [`Normalizer`] uses fixed bounds. [`AdaptiveNormalizer`] keeps the ceiling
//! fixed and lowers the floor over the run: evaluations record the best raw
//! value seen during the current generation, and the engine's explicit
//! generation advance moves the floor down to it. Values evaluated before the
//! advance use the older floor, so a new best value may normalize below zero.
//! Such values are returned as is, never clamped.
//!
//! When `max == min` there is nothing to discriminate and every value
//! normalizes to 0.
//!
//! ```rust
//! use rebalance::normalization::AdaptiveNormalizer;
//!
//! let normalizer = AdaptiveNormalizer::new(2.0, 10.0);
//! assert_eq!(normalizer.normalize(6.0), 0.5);
//!
//! normalizer.observe(1.0);
//! assert_eq!(normalizer.normalize(1.0), -0.125);
//!
//! normalizer.end_generation();
//! assert_eq!(normalizer.floor(), 1.0);
//! assert_eq!(normalizer.normalize(1.0), 0.0);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Deb's normalization with a degenerate range mapped to 0.
fn deb_normalize(raw: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (raw - min) / (max - min)
}

/// Normalization with static bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    min: f64,
    max: f64,
}

impl Normalizer {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn normalize(&self, raw: f64) -> f64 {
        deb_normalize(raw, self.min, self.max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Normalization whose floor is refined once per generation.
///
/// All state lives in atomics, so a single instance can be shared by every
/// evaluation worker. Observations only ever lower the pending floor, which
/// makes the result independent of evaluation order within a generation.
#[derive(Debug)]
pub struct AdaptiveNormalizer {
    ceiling: f64,
    floor: AtomicU64,
    pending: AtomicU64,
}

impl AdaptiveNormalizer {
    /// Creates a normalizer with an initial floor estimate and a fixed ceiling.
    pub fn new(initial_floor: f64, ceiling: f64) -> Self {
        Self {
            ceiling,
            floor: AtomicU64::new(initial_floor.to_bits()),
            pending: AtomicU64::new(initial_floor.to_bits()),
        }
    }

    /// The floor currently used for normalization.
    pub fn floor(&self) -> f64 {
        f64::from_bits(self.floor.load(Ordering::Acquire))
    }

    /// The best raw value observed since the last generation advance.
    pub fn pending_floor(&self) -> f64 {
        f64::from_bits(self.pending.load(Ordering::Acquire))
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Normalizes against the current floor. The result is not clamped.
    pub fn normalize(&self, raw: f64) -> f64 {
        deb_normalize(raw, self.floor(), self.ceiling)
    }

    /// Records a raw value. Non-finite values are ignored.
    pub fn observe(&self, raw: f64) {
        if !raw.is_finite() {
            return;
        }
        let mut current = self.pending.load(Ordering::Acquire);
        while raw < f64::from_bits(current) {
            match self.pending.compare_exchange_weak(
                current,
                raw.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    /// Lowers the floor to the best value observed, if it is smaller.
    pub fn end_generation(&self) {
        let pending = self.pending_floor();
        let floor = self.floor();
        if pending < floor {
            debug!(from = floor, to = pending, "Lowering normalization floor");
            self.floor.store(pending.to_bits(), Ordering::Release);
        }
    }
}

impl Clone for AdaptiveNormalizer {
    fn clone(&self) -> Self {
        Self {
            ceiling: self.ceiling,
            floor: AtomicU64::new(self.floor.load(Ordering::Acquire)),
            pending: AtomicU64::new(self.pending.load(Ordering::Acquire)),
        }
    }
}
