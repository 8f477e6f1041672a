//! Incoming fire folded into a decaying, hysteresis-smoothed pinned state.

use glam::DVec2;

use skirmish_core::constants::*;
use skirmish_core::types::bearing_between;

#[derive(Debug, Clone, Default)]
pub struct SuppressionModel {
    level: f64,
    /// Bearing from the target toward the most recent shooter (radians).
    bearing: Option<f64>,
    suppressed: bool,
    spike: bool,
}

impl SuppressionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a round that hit (`hit`) or passed close to the agent at `to`,
    /// fired from `from`.
    pub fn accumulate(&mut self, hit: bool, from: DVec2, to: DVec2) {
        let increment = if hit {
            SUPPRESSION_HIT_INCREMENT
        } else {
            SUPPRESSION_NEAR_MISS_INCREMENT
        };
        if let Some(bearing) = bearing_between(to, from) {
            self.bearing = Some(bearing);
        }
        self.apply_level(self.level + increment);
    }

    /// Per-tick decay. Returns and clears the spike flag.
    pub fn decay(&mut self) -> bool {
        self.apply_level(self.level - SUPPRESSION_DECAY_PER_TICK);
        std::mem::take(&mut self.spike)
    }

    /// Move to `level` (clamped), raising the spike on an upward crossing of
    /// the enter threshold and updating the hysteresis flag.
    pub fn apply_level(&mut self, level: f64) {
        let before = self.level;
        self.level = level.clamp(0.0, 1.0);
        if before < SUPPRESSION_ENTER_THRESHOLD && self.level >= SUPPRESSION_ENTER_THRESHOLD {
            self.spike = true;
        }
        if self.level >= SUPPRESSION_ENTER_THRESHOLD {
            self.suppressed = true;
        } else if self.level < SUPPRESSION_CLEAR_THRESHOLD {
            self.suppressed = false;
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Whether a spike is pending (not yet consumed by `decay`).
    pub fn spike_pending(&self) -> bool {
        self.spike
    }
}
