//! Decision system: runs the per-agent pipeline in ascending id order.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use skirmish_ai::{step, AgentMemory, DecisionContext, StepReport};
use skirmish_core::components::*;
use skirmish_core::events::DecisionEvent;
use skirmish_core::types::AgentId;

use super::perception::WorldView;
use super::squad::SquadState;
use crate::registry::AgentRegistry;

pub fn run(
    world: &mut World,
    view: &WorldView,
    registry: &AgentRegistry,
    squads: &BTreeMap<u32, SquadState>,
    sight_range: f64,
    tick: u64,
    events: &mut Vec<DecisionEvent>,
) {
    let order: Vec<(AgentId, Entity)> = registry
        .iter()
        .filter(|(_, record)| record.alive)
        .map(|(id, record)| (id, record.entity))
        .collect();
    let liveness = |id: AgentId| registry.is_alive(id);

    for (id, entity) in order {
        let Some(sample) = view.get(id) else {
            continue;
        };
        let sightings = view.sightings(sample, sight_range);

        let Ok((profile, tactical, fire, social, memory)) = world.query_one_mut::<(
            &AgentProfile,
            &TacticalInputs,
            &FireSolution,
            &SocialSignals,
            &mut AgentMemory,
        )>(entity) else {
            continue;
        };

        let mut squad = squads
            .get(&sample.squad)
            .map(|s| s.inputs)
            .unwrap_or_default();
        squad.social = *social;

        let ctx = DecisionContext {
            agent: id,
            tick,
            position: sample.position,
            profile: *profile,
            squad,
            tactical: *tactical,
            hit_chance: fire.hit_chance,
        };
        let report = step(memory, &sightings, &liveness, &ctx);
        push_events(id, tick, &report, events);
    }
}

fn push_events(agent: AgentId, tick: u64, report: &StepReport, events: &mut Vec<DecisionEvent>) {
    let Some(cause) = report.review else {
        return;
    };
    if cause.is_forced() {
        events.push(DecisionEvent::ForcedReview { agent, cause, tick });
    }
    let Some(selection) = report.selection else {
        return;
    };
    if let Some(from) = report.switched_from {
        events.push(DecisionEvent::GoalChanged {
            agent,
            from,
            to: selection.goal,
            cause,
            tick,
        });
    } else if selection.held {
        events.push(DecisionEvent::GoalHeld {
            agent,
            held: selection.goal,
            rejected: selection.candidate,
            margin: selection.margin,
            tick,
        });
    }
}
