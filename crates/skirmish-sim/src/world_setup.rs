//! Entity spawn factories and seeded scenario generation.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::AgentMemory;
use skirmish_core::components::*;
use skirmish_core::enums::{SquadIntent, Team};
use skirmish_core::types::AgentId;

use crate::engine::SimConfig;
use crate::error::{Result, SimError};
use crate::registry::{AgentRecord, AgentRegistry};
use crate::scenario::{AgentSpec, Scenario, SquadSpec};

/// Distance between the two lines at generation time (meters).
const FRONT_SEPARATION: f64 = 100.0;
/// Lateral spacing between squads of one team.
const SQUAD_SPACING: f64 = 30.0;
/// Scatter of squad members around the squad center.
const MEMBER_SCATTER: f64 = 6.0;

/// Spawn one combatant with its full component bundle and register it.
/// A spec without an id takes the next free one.
pub fn spawn_agent(
    world: &mut World,
    registry: &mut AgentRegistry,
    spec: &AgentSpec,
) -> Result<AgentId> {
    let id = spec.id.unwrap_or_else(|| registry.next_id());
    if registry.get(id).is_some() {
        return Err(SimError::DuplicateAgent(id));
    }

    let entity = world.spawn((
        Combatant {
            id,
            team: spec.team,
            squad: spec.squad,
        },
        Position(spec.position),
        spec.profile,
        spec.tactical,
        FireSolution {
            hit_chance: spec.hit_chance.clamp(0.0, 1.0),
        },
        SocialSignals::default(),
        AgentMemory::new(&spec.profile),
    ));
    registry.insert(
        id,
        AgentRecord {
            entity,
            team: spec.team,
            squad: spec.squad,
            alive: true,
        },
    )?;
    Ok(id)
}

/// Two opposing lines of squads with randomized profiles.
///
/// Blue squads take ids `0..squads_per_team` and advance from the west; Red
/// squads follow and hold in the east.
pub fn generate_skirmish(
    rng: &mut ChaCha8Rng,
    config: SimConfig,
    squads_per_team: u32,
    squad_size: u32,
) -> Scenario {
    let mut scenario = Scenario {
        config,
        ..Default::default()
    };
    let mut next_id = 0;

    for (team_index, team) in [Team::Blue, Team::Red].into_iter().enumerate() {
        let x = if team == Team::Blue {
            -FRONT_SEPARATION / 2.0
        } else {
            FRONT_SEPARATION / 2.0
        };
        for i in 0..squads_per_team {
            let squad = team_index as u32 * squads_per_team + i;
            let y = (i as f64 - (squads_per_team as f64 - 1.0) / 2.0) * SQUAD_SPACING;
            let center = DVec2::new(x, y);

            scenario.squads.push(SquadSpec {
                id: squad,
                intent: if team == Team::Blue {
                    SquadIntent::Advance
                } else {
                    SquadIntent::Hold
                },
                rally_point: Some(center),
                posture: if team == Team::Blue { 0.3 } else { -0.2 },
                ..Default::default()
            });

            for _ in 0..squad_size {
                let offset = DVec2::new(
                    rng.gen_range(-MEMBER_SCATTER..MEMBER_SCATTER),
                    rng.gen_range(-MEMBER_SCATTER..MEMBER_SCATTER),
                );
                scenario.agents.push(AgentSpec {
                    id: Some(AgentId(next_id)),
                    team,
                    squad,
                    position: center + offset,
                    profile: random_profile(rng),
                    tactical: TacticalInputs {
                        sightline: rng.gen_range(0.0..1.0),
                        ..Default::default()
                    },
                    hit_chance: rng.gen_range(0.1..0.6),
                });
                next_id += 1;
            }
        }
    }
    scenario
}

fn random_profile(rng: &mut ChaCha8Rng) -> AgentProfile {
    AgentProfile {
        skills: Skills {
            marksmanship: rng.gen_range(0.2..0.9),
            fieldcraft: rng.gen_range(0.2..0.9),
            discipline: rng.gen_range(0.1..1.0),
        },
        psych: Psych {
            fear: rng.gen_range(0.05..0.6),
            morale: rng.gen_range(0.3..0.9),
            composure: rng.gen_range(0.2..0.9),
            experience: rng.gen_range(0.0..1.0),
        },
    }
}
