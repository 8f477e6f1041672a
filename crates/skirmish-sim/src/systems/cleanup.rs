//! Cleanup system: removes the entities of agents killed this tick.

use hecs::{Entity, World};

use skirmish_core::components::Combatant;

use crate::registry::AgentRegistry;

/// Despawn every entity whose agent is no longer alive. The registry keeps
/// the dead record for liveness lookups. Uses a pre-allocated buffer to avoid
/// per-tick allocation.
pub fn run(world: &mut World, registry: &AgentRegistry, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, combatant) in world.query_mut::<&Combatant>() {
        if !registry.is_alive(combatant.id) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        tracing::debug!(?entity, "despawned dead agent");
        let _ = world.despawn(entity);
    }
}
