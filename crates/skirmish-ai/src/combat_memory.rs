//! Residual memory of nearby combat.
//!
//! Keeps the most confident recent stimulus: a weaker report never
//! overwrites a stronger one, only decay lowers the strength.

use glam::DVec2;

use skirmish_core::constants::*;

#[derive(Debug, Clone, Default)]
pub struct CombatMemory {
    strength: f64,
    position: Option<DVec2>,
}

impl CombatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_gunfire(&mut self, position: DVec2, strength: f64) {
        let strength = strength.clamp(0.0, 1.0);
        if strength >= self.strength {
            self.strength = strength;
            self.position = Some(position);
        }
    }

    pub fn decay(&mut self) {
        self.strength = (self.strength - COMBAT_MEMORY_DECAY_PER_TICK).max(0.0);
    }

    pub fn is_activated(&self) -> bool {
        self.strength > COMBAT_MEMORY_ACTIVE_THRESHOLD
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn position(&self) -> Option<DVec2> {
        self.position
    }
}
