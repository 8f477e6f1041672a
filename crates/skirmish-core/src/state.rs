//! Simulation snapshot: the complete visible state published after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::DecisionEvent;
use crate::types::{AgentId, SimTime};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub agents: Vec<AgentView>,
    pub events: Vec<DecisionEvent>,
}

impl SimSnapshot {
    pub fn agent(&self, id: AgentId) -> Option<&AgentView> {
        self.agents.iter().find(|a| a.id == id)
    }
}

/// One agent's decision state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub team: Team,
    pub squad: u32,
    pub position: DVec2,
    pub goal: Goal,
    pub phase: CommitPhase,
    pub suppression: f64,
    pub suppressed: bool,
    pub combat_memory: f64,
    pub threat_count: usize,
    pub visible_threats: usize,
    pub shatter_pressure: f64,
    pub hysteresis_margin: f64,
    pub decision_debt: f64,
    pub goal_streak: u32,
    pub thresholds: ThresholdView,
    pub outputs: OutputView,
}

/// Personal thresholds as currently drifted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThresholdView {
    pub engage_shot_quality: f64,
    pub long_range_shot_quality: f64,
    pub push_on_miss_momentum: f64,
    pub hold_on_hit_momentum: f64,
    pub cover_fear: f64,
}

/// Goal-specific outputs read back by movement and the orchestrator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutputView {
    pub move_target: Option<DVec2>,
    pub flank_side: Option<FlankSide>,
    pub reinforcement_target: Option<DVec2>,
}
