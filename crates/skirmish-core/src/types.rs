//! Fundamental identity, geometry and time types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable handle of a simulated combatant.
///
/// Used as a weak identity reference: comparing two ids or looking one up in
/// a liveness table never implies ownership of the other agent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Bearing from `from` to `to` in radians (0 = +x axis, counter-clockwise),
/// or `None` when the displacement is degenerate.
pub fn bearing_between(from: DVec2, to: DVec2) -> Option<f64> {
    let d = to - from;
    if d.length_squared() <= f64::EPSILON {
        return None;
    }
    Some(d.y.atan2(d.x))
}

/// Convert seconds to whole ticks at the simulation tick rate.
pub fn secs_to_ticks(secs: f64) -> u64 {
    (secs * crate::constants::TICK_RATE as f64).round() as u64
}
