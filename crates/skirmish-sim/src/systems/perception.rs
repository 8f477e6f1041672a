//! Start-of-tick snapshot of every living agent.
//!
//! Captured once before any memory is touched. All sensing and squad
//! aggregation for the tick read from this view, so the result does not
//! depend on the order agents are updated in.

use glam::DVec2;
use hecs::World;

use skirmish_core::components::{AgentProfile, Combatant, Position, Sighting};
use skirmish_core::enums::Team;
use skirmish_core::types::AgentId;

use crate::registry::AgentRegistry;

#[derive(Debug, Clone, Copy)]
pub struct AgentSample {
    pub id: AgentId,
    pub team: Team,
    pub squad: u32,
    pub position: DVec2,
    pub fear: f64,
}

/// Living agents in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct WorldView {
    agents: Vec<AgentSample>,
}

impl WorldView {
    pub fn capture(world: &World, registry: &AgentRegistry) -> Self {
        let mut agents: Vec<AgentSample> = world
            .query::<(&Combatant, &Position, &AgentProfile)>()
            .iter()
            .filter(|(_, (combatant, _, _))| registry.is_alive(combatant.id))
            .map(|(_, (combatant, position, profile))| AgentSample {
                id: combatant.id,
                team: combatant.team,
                squad: combatant.squad,
                position: position.0,
                fear: profile.psych.fear,
            })
            .collect();
        agents.sort_by_key(|a| a.id);
        Self { agents }
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentSample> {
        self.agents
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.agents[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentSample> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Enemies of `observer` within `range`. No line-of-sight test.
    pub fn sightings(&self, observer: &AgentSample, range: f64) -> Vec<Sighting> {
        let range_sq = range * range;
        self.agents
            .iter()
            .filter(|a| a.team.opposes(observer.team))
            .filter(|a| a.position.distance_squared(observer.position) <= range_sq)
            .map(|a| Sighting {
                source: a.id,
                position: a.position,
            })
            .collect()
    }

    /// Teammates of `observer` (excluding itself) within `range`.
    pub fn allies_within(&self, observer: &AgentSample, range: f64) -> usize {
        let range_sq = range * range;
        self.agents
            .iter()
            .filter(|a| a.id != observer.id && a.team == observer.team)
            .filter(|a| a.position.distance_squared(observer.position) <= range_sq)
            .count()
    }
}
