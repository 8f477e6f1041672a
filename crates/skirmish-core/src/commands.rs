//! Orchestrator commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! agent's memory is updated.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::{OfficerOrder, TacticalInputs};
use crate::enums::*;
use crate::types::AgentId;

/// All inputs the squad orchestrator, combat resolver and tactical map feed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Movement ---
    /// Teleport an agent (movement execution lives outside the core).
    SetPosition { agent: AgentId, position: DVec2 },

    // --- Squad orchestration ---
    SetSquadIntent { squad: u32, intent: SquadIntent },
    IssueOrder { squad: u32, order: OfficerOrder },
    ClearOrder { squad: u32 },
    SetSharedContact {
        squad: u32,
        position: Option<DVec2>,
    },
    SetRallyPoint {
        squad: u32,
        position: Option<DVec2>,
    },
    SetPosture { squad: u32, posture: f64 },

    // --- Tactical map / navigator ---
    SetTactical {
        agent: AgentId,
        tactical: TacticalInputs,
    },
    SetHitChance { agent: AgentId, hit_chance: f64 },

    // --- Combat resolution ---
    /// A resolved shot from `shooter` at `target`.
    ShotFired {
        shooter: AgentId,
        target: AgentId,
        hit: bool,
        expected_chance: f64,
    },
    KillAgent { agent: AgentId },
}
