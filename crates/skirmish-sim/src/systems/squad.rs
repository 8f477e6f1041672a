//! Squad orchestration: per-squad inputs and per-agent social aggregates.

use std::collections::BTreeMap;

use hecs::World;

use skirmish_core::components::{Combatant, SocialSignals, SquadInputs};
use skirmish_core::constants::*;

use super::perception::WorldView;

/// Orchestrator-held state of one squad.
#[derive(Debug, Clone, Default)]
pub struct SquadState {
    /// Intent, order, contact report, rally point and posture. The social
    /// part is filled per agent.
    pub inputs: SquadInputs,
    pub avg_fear: f64,
    pub fear_delta: f64,
    prev_avg_fear: Option<f64>,
}

impl SquadState {
    pub fn new(inputs: SquadInputs) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }
}

/// Refresh squad fear averages, then every agent's `SocialSignals`.
pub fn run(
    world: &mut World,
    view: &WorldView,
    squads: &mut BTreeMap<u32, SquadState>,
    sight_range: f64,
) {
    let mut fear_sums: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
    for agent in view.iter() {
        let entry = fear_sums.entry(agent.squad).or_default();
        entry.0 += agent.fear.clamp(0.0, 1.0);
        entry.1 += 1;
    }
    for (id, state) in squads.iter_mut() {
        let Some(&(sum, count)) = fear_sums.get(id) else {
            continue;
        };
        let avg = sum / count as f64;
        state.fear_delta = state.prev_avg_fear.map_or(0.0, |prev| avg - prev);
        state.avg_fear = avg;
        state.prev_avg_fear = Some(avg);
    }

    for (_entity, (combatant, social)) in world.query_mut::<(&Combatant, &mut SocialSignals)>() {
        let Some(sample) = view.get(combatant.id) else {
            continue;
        };
        let allies = view.allies_within(sample, ALLY_SUPPORT_RANGE);
        let crowd = view.allies_within(sample, CROWDING_RADIUS);
        let enemies = view.sightings(sample, sight_range).len();

        social.visible_allies = allies as u32;
        social.isolation_ticks = if allies == 0 {
            social.isolation_ticks.saturating_add(1)
        } else {
            0
        };
        if let Some(state) = squads.get(&combatant.squad) {
            social.squad_avg_fear = state.avg_fear;
            social.squad_fear_delta = state.fear_delta;
        }
        social.crowding = (crowd as f64 / CROWDING_FULL).min(1.0);
        social.outnumbered = enemies as f64 / (allies as f64 + 1.0);
    }
}
