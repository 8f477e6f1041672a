//! Per-agent working memory, composed from one substructure per component.
//!
//! Exclusively owned by its agent. Cross-agent references are `AgentId`
//! handles only.

use glam::DVec2;

use skirmish_core::components::{AgentProfile, OfficerOrder};
use skirmish_core::constants::*;
use skirmish_core::enums::{FlankSide, Goal};
use skirmish_core::state::OutputView;

use crate::combat_memory::CombatMemory;
use crate::commitment::CommitmentController;
use crate::peek::PeekState;
use crate::shooting::ShotTracker;
use crate::suppression::SuppressionModel;
use crate::thresholds::ThresholdEvolution;
use crate::threat_memory::ThreatMemory;

/// Goal-specific outputs read back by movement and the squad orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionOutputs {
    pub move_target: Option<DVec2>,
    pub flank_side: Option<FlankSide>,
    pub reinforcement_target: Option<DVec2>,
}

impl From<DecisionOutputs> for OutputView {
    fn from(o: DecisionOutputs) -> Self {
        OutputView {
            move_target: o.move_target,
            flank_side: o.flank_side,
            reinforcement_target: o.reinforcement_target,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentMemory {
    pub threats: ThreatMemory,
    pub suppression: SuppressionModel,
    pub combat: CombatMemory,
    pub commitment: CommitmentController,
    pub thresholds: ThresholdEvolution,
    pub shots: ShotTracker,
    pub peek: PeekState,
    pub(crate) goal: Goal,
    pub(crate) outputs: DecisionOutputs,
    pub(crate) incoming_fire: u32,
    pub(crate) recent_fire: f64,
    pub(crate) burst_trigger: bool,
    pub(crate) last_order: Option<OfficerOrder>,
}

impl AgentMemory {
    /// Fresh memory for a newly spawned agent.
    pub fn new(profile: &AgentProfile) -> Self {
        Self {
            threats: ThreatMemory::new(),
            suppression: SuppressionModel::new(),
            combat: CombatMemory::new(),
            commitment: CommitmentController::new(profile.skills.discipline),
            thresholds: ThresholdEvolution::new(),
            shots: ShotTracker::new(),
            peek: PeekState::new(),
            goal: Goal::default(),
            outputs: DecisionOutputs::default(),
            incoming_fire: 0,
            recent_fire: 0.0,
            burst_trigger: false,
            last_order: None,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn outputs(&self) -> DecisionOutputs {
        self.outputs
    }

    /// Rounds received since the last `step`.
    pub fn incoming_fire(&self) -> u32 {
        self.incoming_fire
    }

    pub fn recent_fire(&self) -> f64 {
        self.recent_fire
    }

    /// A round fired from `from` hit or narrowly missed this agent at `to`.
    pub fn receive_fire(&mut self, hit: bool, from: DVec2, to: DVec2, tick: u64) {
        self.suppression.accumulate(hit, from, to);
        self.incoming_fire += 1;
        let pressure = if hit {
            SHATTER_ON_HIT
        } else {
            SHATTER_ON_NEAR_MISS
        };
        self.commitment.add_shatter_pressure(pressure, tick);
        self.threats
            .remember_position(from, tick, THREAT_INCOMING_FIRE_CONFIDENCE);
    }

    /// Record one of this agent's own shots. Returns true on the shot that
    /// completes a burst of misses; the next `step` then forces a review.
    pub fn record_shot_outcome(&mut self, hit: bool, expected_chance: f64, range: f64) -> bool {
        let fired = self.shots.record(hit, expected_chance, range);
        self.burst_trigger |= fired;
        fired
    }

    pub fn hear_gunfire(&mut self, position: DVec2, strength: f64) {
        self.combat.record_gunfire(position, strength);
    }

    /// Situational stress in [0, 1].
    pub fn stress(&self, profile: &AgentProfile) -> f64 {
        let fire = (self.incoming_fire as f64 / STRESS_FIRE_SATURATION).min(1.0);
        (STRESS_SUPPRESSION_WEIGHT * self.suppression.level()
            + STRESS_FEAR_WEIGHT * profile.psych.fear.clamp(0.0, 1.0)
            + STRESS_FIRE_WEIGHT * fire)
            .clamp(0.0, 1.0)
    }
}
