//! Agent registry: stable ids to entities, plus the liveness side table.
//!
//! Records of dead agents are kept after their entity is despawned so that
//! identity references held in other agents' memories resolve to "dead"
//! rather than "unknown".

use std::collections::BTreeMap;

use hecs::Entity;

use skirmish_core::enums::Team;
use skirmish_core::types::AgentId;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy)]
pub struct AgentRecord {
    pub entity: Entity,
    pub team: Team,
    pub squad: u32,
    pub alive: bool,
}

#[derive(Debug, Default)]
pub struct AgentRegistry {
    records: BTreeMap<AgentId, AgentRecord>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AgentId, record: AgentRecord) -> Result<()> {
        if self.records.contains_key(&id) {
            return Err(SimError::DuplicateAgent(id));
        }
        self.records.insert(id, record);
        Ok(())
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentRecord> {
        self.records.get(&id)
    }

    /// Entity of a living agent.
    pub fn living_entity(&self, id: AgentId) -> Result<Entity> {
        match self.records.get(&id) {
            Some(record) if record.alive => Ok(record.entity),
            _ => Err(SimError::UnknownAgent(id)),
        }
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.records.get(&id).is_some_and(|r| r.alive)
    }

    /// Mark an agent dead. Returns its entity if it was alive.
    pub fn mark_dead(&mut self, id: AgentId) -> Result<Option<Entity>> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(SimError::UnknownAgent(id))?;
        if !record.alive {
            return Ok(None);
        }
        record.alive = false;
        Ok(Some(record.entity))
    }

    /// Next unused id.
    pub fn next_id(&self) -> AgentId {
        self.records
            .keys()
            .next_back()
            .map_or(AgentId(0), |id| AgentId(id.0 + 1))
    }

    pub fn living_count(&self) -> usize {
        self.records.values().filter(|r| r.alive).count()
    }

    /// All records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &AgentRecord)> {
        self.records.iter().map(|(id, r)| (*id, r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
