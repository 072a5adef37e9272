//! Consecutive-fix jump detection.
//!
//! A heuristic outlier check, not a filter: it flags a fix that lands
//! implausibly far from the previous accepted one and leaves smoothing to
//! the caller.

use crate::models::types::Coordinate;
use crate::spatial::haversine_distance;

/// Outcome of comparing one fix against the previous accepted fix
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DriftCheck {
    /// Distance from the previous accepted fix, if there was one
    pub jump_m: Option<f64>,
    pub is_drifting: bool,
}

/// Tracks the last accepted coordinate between fixes
#[derive(Clone, Debug)]
pub struct DriftDetector {
    threshold_m: f64,
    previous: Option<Coordinate>,
}

impl DriftDetector {
    pub fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            previous: None,
        }
    }

    pub fn previous(&self) -> Option<Coordinate> {
        self.previous
    }

    /// Compare `next` with the previous accepted fix without accepting it
    pub fn check(&self, next: Coordinate) -> DriftCheck {
        let jump_m = self.previous.map(|prev| haversine_distance(prev, next));

        DriftCheck {
            jump_m,
            is_drifting: jump_m.is_some_and(|d| d > self.threshold_m),
        }
    }

    /// Compare `next` with the previous accepted fix, then accept it.
    ///
    /// A drifting fix is still accepted, so a genuine relocation only raises
    /// the flag once.
    pub fn observe(&mut self, next: Coordinate) -> DriftCheck {
        let result = self.check(next);
        self.previous = Some(next);
        result
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
