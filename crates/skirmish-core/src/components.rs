//! External-input records and ECS components.
//!
//! Components are plain data structs. Decision logic lives in `skirmish-ai`,
//! orchestration lives in the engine's systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::AgentId;

/// Trained skills, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub marksmanship: f64,
    pub fieldcraft: f64,
    pub discipline: f64,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            marksmanship: 0.5,
            fieldcraft: 0.5,
            discipline: 0.5,
        }
    }
}

/// Psychological state, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Psych {
    pub fear: f64,
    pub morale: f64,
    pub composure: f64,
    pub experience: f64,
}

impl Default for Psych {
    fn default() -> Self {
        Self {
            fear: 0.2,
            morale: 0.5,
            composure: 0.5,
            experience: 0.5,
        }
    }
}

/// Agent profile read by the decision core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    pub skills: Skills,
    pub psych: Psych,
}

/// An order handed down by an officer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfficerOrder {
    pub kind: OrderKind,
    /// Urgency in [0, 1].
    pub priority: f64,
    /// How forcefully the order was given, in [0, 1].
    pub strength: f64,
    /// Destination for movement orders.
    #[serde(default)]
    pub target: Option<DVec2>,
    /// Tick at which the order lapses.
    pub expires_at_tick: u64,
}

impl OfficerOrder {
    pub fn is_active(&self, tick: u64) -> bool {
        tick < self.expires_at_tick
    }
}

/// Social aggregates computed by the squad orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialSignals {
    /// Allies currently close enough to count as support.
    pub visible_allies: u32,
    /// Mean fear across the squad.
    pub squad_avg_fear: f64,
    /// Change in mean squad fear since the previous tick.
    pub squad_fear_delta: f64,
    /// Consecutive ticks with no visible ally.
    pub isolation_ticks: u32,
    /// Crowding pressure in [0, 1].
    pub crowding: f64,
    /// Visible enemies per (allies + 1).
    pub outnumbered: f64,
}

impl Default for SocialSignals {
    fn default() -> Self {
        Self {
            visible_allies: 0,
            squad_avg_fear: 0.0,
            squad_fear_delta: 0.0,
            isolation_ticks: 0,
            crowding: 0.0,
            outnumbered: 0.0,
        }
    }
}

/// Squad-level inputs, overwritten wholesale once per tick by the orchestrator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadInputs {
    pub intent: SquadIntent,
    pub order: Option<OfficerOrder>,
    /// Position of a contact reported by another squad member.
    pub shared_contact: Option<DVec2>,
    /// Where stragglers should regroup.
    pub rally_point: Option<DVec2>,
    /// Offense (+1) to defense (-1) lean.
    pub posture: f64,
    pub social: SocialSignals,
}

/// Precomputed tactical-map flags for the agent's position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalFlags {
    pub corner: bool,
    pub doorway: bool,
    pub wall: bool,
    pub window: bool,
    pub interior: bool,
}

/// Tactical-map and navigator inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalInputs {
    pub flags: TacticalFlags,
    /// Local sightline quality in [0, 1].
    pub sightline: f64,
    /// Whether the navigator currently has a valid path.
    pub path_available: bool,
}

impl Default for TacticalInputs {
    fn default() -> Self {
        Self {
            flags: TacticalFlags::default(),
            sightline: 0.0,
            path_available: true,
        }
    }
}

/// One enemy seen this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub source: AgentId,
    pub position: DVec2,
}

// --- ECS components ---

/// Identity and allegiance of a combatant entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combatant {
    pub id: AgentId,
    pub team: Team,
    pub squad: u32,
}

/// World position of an entity (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Estimated hit chance against the agent's best current target, in [0, 1].
/// Written by the combat resolver.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireSolution {
    pub hit_chance: f64,
}
