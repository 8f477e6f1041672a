//! Snapshot system: queries the ECS world and builds a `SimSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_ai::AgentMemory;
use skirmish_core::components::{Combatant, Position};
use skirmish_core::events::DecisionEvent;
use skirmish_core::state::{AgentView, SimSnapshot, ThresholdView};
use skirmish_core::types::SimTime;

/// Build a complete snapshot. `tick` is the tick the systems just ran for.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    tick: u64,
    events: Vec<DecisionEvent>,
) -> SimSnapshot {
    let mut agents: Vec<AgentView> = world
        .query::<(&Combatant, &Position, &AgentMemory)>()
        .iter()
        .map(|(_, (combatant, position, memory))| build_agent(combatant, position, memory, tick))
        .collect();
    agents.sort_by_key(|a| a.id);

    SimSnapshot {
        time: *time,
        agents,
        events,
    }
}

fn build_agent(
    combatant: &Combatant,
    position: &Position,
    memory: &AgentMemory,
    tick: u64,
) -> AgentView {
    let thresholds = memory.thresholds.get();
    AgentView {
        id: combatant.id,
        team: combatant.team,
        squad: combatant.squad,
        position: position.0,
        goal: memory.goal(),
        phase: memory.commitment.phase(tick),
        suppression: memory.suppression.level(),
        suppressed: memory.suppression.is_suppressed(),
        combat_memory: memory.combat.strength(),
        threat_count: memory.threats.len(),
        visible_threats: memory.threats.visible_count(),
        shatter_pressure: memory.commitment.pressure(),
        hysteresis_margin: memory.commitment.hysteresis_margin(),
        decision_debt: memory.commitment.decision_debt(),
        goal_streak: memory.commitment.streak(),
        thresholds: ThresholdView {
            engage_shot_quality: thresholds.engage_shot_quality,
            long_range_shot_quality: thresholds.long_range_shot_quality,
            push_on_miss_momentum: thresholds.push_on_miss_momentum,
            hold_on_hit_momentum: thresholds.hold_on_hit_momentum,
            cover_fear: thresholds.cover_fear,
        },
        outputs: memory.outputs().into(),
    }
}
