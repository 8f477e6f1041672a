//! Scenario documents: engine config, squads and agents as serde JSON.
//!
//! Every field has a default, so a scenario only needs to name what it
//! changes:
//!
//! ```json
//! { "agents": [ { "team": "Red", "squad": 1, "position": [40.0, 0.0] } ] }
//! ```

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::components::{AgentProfile, OfficerOrder, SquadInputs, TacticalInputs};
use skirmish_core::enums::{SquadIntent, Team};
use skirmish_core::types::AgentId;

use crate::engine::SimConfig;
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: SimConfig,
    pub squads: Vec<SquadSpec>,
    pub agents: Vec<AgentSpec>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Initial orchestrator state of one squad.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadSpec {
    pub id: u32,
    pub intent: SquadIntent,
    pub order: Option<OfficerOrder>,
    pub shared_contact: Option<DVec2>,
    pub rally_point: Option<DVec2>,
    pub posture: f64,
}

impl SquadSpec {
    pub fn inputs(&self) -> SquadInputs {
        SquadInputs {
            intent: self.intent,
            order: self.order,
            shared_contact: self.shared_contact,
            rally_point: self.rally_point,
            posture: self.posture.clamp(-1.0, 1.0),
            ..Default::default()
        }
    }
}

/// One combatant to spawn. A missing `id` takes the next free one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub id: Option<AgentId>,
    pub team: Team,
    pub squad: u32,
    pub position: DVec2,
    pub profile: AgentProfile,
    pub tactical: TacticalInputs,
    pub hit_chance: f64,
}
