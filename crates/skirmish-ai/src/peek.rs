//! Peek cooldown and the no-contact penalty that stops an agent re-peeking
//! the same empty spot.

use glam::DVec2;

use skirmish_core::constants::*;

#[derive(Debug, Clone, Default)]
pub struct PeekState {
    cooldown_until: u64,
    penalty: f64,
    spot: Option<DVec2>,
    pending: bool,
}

impl PeekState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, tick: u64) -> bool {
        tick >= self.cooldown_until
    }

    /// A peek was just chosen at `position`.
    pub fn begin(&mut self, tick: u64, position: DVec2) {
        if self.moved_away(position) {
            self.penalty = 0.0;
        }
        self.cooldown_until = tick + PEEK_COOLDOWN_TICKS;
        self.spot = Some(position);
        self.pending = true;
    }

    /// Settle the outstanding peek.
    pub fn resolve(&mut self, found_contact: bool) {
        if !std::mem::take(&mut self.pending) {
            return;
        }
        if found_contact {
            self.penalty = 0.0;
        } else {
            self.penalty = (self.penalty + PEEK_NO_CONTACT_PENALTY).min(PEEK_PENALTY_MAX);
        }
    }

    pub fn decay(&mut self, position: DVec2) {
        if self.moved_away(position) {
            self.penalty = 0.0;
        } else {
            self.penalty = (self.penalty - PEEK_PENALTY_DECAY_PER_TICK).max(0.0);
        }
    }

    fn moved_away(&self, position: DVec2) -> bool {
        self.spot
            .is_some_and(|spot| spot.distance(position) > PEEK_SPOT_RADIUS)
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
