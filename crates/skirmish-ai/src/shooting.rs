//! Shot outcome tracking: momentum and the burst-miss trigger.

use skirmish_core::constants::*;

#[derive(Debug, Clone, Default)]
pub struct ShotTracker {
    momentum: f64,
    consecutive_misses: u32,
    shots: u32,
    hits: u32,
    last_range: Option<f64>,
}

impl ShotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved shot. Returns true exactly when this miss completes
    /// a burst of consecutive misses, resetting the counter.
    pub fn record(&mut self, hit: bool, expected_chance: f64, range: f64) -> bool {
        let expected = expected_chance.clamp(0.0, 1.0);
        self.shots += 1;
        self.last_range = Some(range.max(0.0));

        if hit {
            self.hits += 1;
            self.consecutive_misses = 0;
            self.momentum += SHOT_MOMENTUM_STEP * (1.5 - expected);
        } else {
            self.consecutive_misses += 1;
            self.momentum -= SHOT_MOMENTUM_STEP * (0.5 + expected);
        }
        self.momentum = self.momentum.clamp(-1.0, 1.0);

        if self.consecutive_misses >= BURST_MISS_LIMIT {
            self.consecutive_misses = 0;
            true
        } else {
            false
        }
    }

    /// Per-tick relaxation of momentum toward zero.
    pub fn decay(&mut self) {
        if self.momentum > 0.0 {
            self.momentum = (self.momentum - SHOT_MOMENTUM_DECAY_PER_TICK).max(0.0);
        } else {
            self.momentum = (self.momentum + SHOT_MOMENTUM_DECAY_PER_TICK).min(0.0);
        }
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    pub fn hit_rate(&self) -> Option<f64> {
        (self.shots > 0).then(|| self.hits as f64 / self.shots as f64)
    }

    pub fn last_range(&self) -> Option<f64> {
        self.last_range
    }
}
