//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, applies orchestrator commands,
//! runs all systems, and produces `SimSnapshot`s. Completely headless, so
//! runs are deterministic and testable.

use std::collections::{BTreeMap, VecDeque};

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_ai::AgentMemory;
use skirmish_core::commands::SimCommand;
use skirmish_core::components::{Combatant, FireSolution, Position, TacticalInputs};
use skirmish_core::constants::{DEFAULT_HEARING_RANGE, DEFAULT_SIGHT_RANGE};
use skirmish_core::events::DecisionEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::{AgentId, SimTime};

use crate::error::{Result, SimError};
use crate::registry::AgentRegistry;
use crate::scenario::{AgentSpec, Scenario};
use crate::systems;
use crate::systems::perception::WorldView;
use crate::systems::squad::SquadState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Range within which an enemy is sighted (meters).
    pub sight_range: f64,
    /// Range within which gunfire is heard (meters).
    pub hearing_range: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sight_range: DEFAULT_SIGHT_RANGE,
            hearing_range: DEFAULT_HEARING_RANGE,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    registry: AgentRegistry,
    squads: BTreeMap<u32, SquadState>,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<DecisionEvent>,
    rejected_commands: u64,
}

impl SimulationEngine {
    /// Create an empty simulation with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            config,
            registry: AgentRegistry::new(),
            squads: BTreeMap::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            rejected_commands: 0,
        }
    }

    /// Build a simulation from a scenario document.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let mut engine = Self::new(scenario.config);
        for squad in &scenario.squads {
            engine
                .squads
                .insert(squad.id, SquadState::new(squad.inputs()));
        }
        for agent in &scenario.agents {
            engine.spawn_agent(agent)?;
        }
        Ok(engine)
    }

    /// Build a seeded two-team skirmish. Layout and profiles are drawn from
    /// `config.seed`, so the seed determines the whole run.
    pub fn generate(config: SimConfig, squads_per_team: u32, squad_size: u32) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let scenario =
            world_setup::generate_skirmish(&mut rng, config, squads_per_team, squad_size);
        Self::from_scenario(&scenario)
    }

    /// Spawn one agent. Fails if its id is already taken.
    pub fn spawn_agent(&mut self, spec: &AgentSpec) -> Result<AgentId> {
        let id = world_setup::spawn_agent(&mut self.world, &mut self.registry, spec)?;
        self.squads.entry(spec.squad).or_default();
        Ok(id)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        let tick = self.time.tick;
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, tick, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Commands dropped because they named an unknown or dead agent or squad.
    pub fn rejected_commands(&self) -> u64 {
        self.rejected_commands
    }

    /// Read-only access to an agent's decision memory.
    pub fn memory(&self, id: AgentId) -> Result<hecs::Ref<'_, AgentMemory>> {
        let entity = self.registry.living_entity(id)?;
        self.world
            .get::<&AgentMemory>(entity)
            .map_err(|_| SimError::UnknownAgent(id))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(&command) {
                tracing::warn!(%err, ?command, "rejected command");
                self.rejected_commands += 1;
            }
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: &SimCommand) -> Result<()> {
        let tick = self.time.tick;
        match *command {
            SimCommand::SetPosition { agent, position } => {
                let entity = self.registry.living_entity(agent)?;
                self.component_mut::<Position>(entity, agent)?.0 = position;
            }
            SimCommand::SetSquadIntent { squad, intent } => {
                self.squad_mut(squad)?.inputs.intent = intent;
            }
            SimCommand::IssueOrder { squad, order } => {
                self.squad_mut(squad)?.inputs.order = Some(order);
            }
            SimCommand::ClearOrder { squad } => {
                self.squad_mut(squad)?.inputs.order = None;
            }
            SimCommand::SetSharedContact { squad, position } => {
                self.squad_mut(squad)?.inputs.shared_contact = position;
            }
            SimCommand::SetRallyPoint { squad, position } => {
                self.squad_mut(squad)?.inputs.rally_point = position;
            }
            SimCommand::SetPosture { squad, posture } => {
                self.squad_mut(squad)?.inputs.posture = posture.clamp(-1.0, 1.0);
            }
            SimCommand::SetTactical { agent, tactical } => {
                let entity = self.registry.living_entity(agent)?;
                *self.component_mut::<TacticalInputs>(entity, agent)? = tactical;
            }
            SimCommand::SetHitChance { agent, hit_chance } => {
                let entity = self.registry.living_entity(agent)?;
                self.component_mut::<FireSolution>(entity, agent)?.hit_chance =
                    hit_chance.clamp(0.0, 1.0);
            }
            SimCommand::ShotFired {
                shooter,
                target,
                hit,
                expected_chance,
            } => {
                self.resolve_shot(shooter, target, hit, expected_chance, tick)?;
            }
            SimCommand::KillAgent { agent } => {
                if self.registry.mark_dead(agent)?.is_some() {
                    tracing::debug!(%agent, tick, "agent killed");
                }
            }
        }
        Ok(())
    }

    /// Feed one resolved shot to the shooter, the target and everyone in
    /// earshot of the shooter.
    fn resolve_shot(
        &mut self,
        shooter: AgentId,
        target: AgentId,
        hit: bool,
        expected_chance: f64,
        tick: u64,
    ) -> Result<()> {
        let shooter_entity = self.registry.living_entity(shooter)?;
        let target_entity = self.registry.living_entity(target)?;
        let from = self.position_of(shooter_entity, shooter)?;
        let to = self.position_of(target_entity, target)?;

        {
            let mut memory = self.component_mut::<AgentMemory>(shooter_entity, shooter)?;
            memory.record_shot_outcome(hit, expected_chance, from.distance(to));
        }
        self.component_mut::<AgentMemory>(target_entity, target)?
            .receive_fire(hit, from, to, tick);

        let range = self.config.hearing_range;
        for (_entity, (combatant, position, memory)) in self
            .world
            .query_mut::<(&Combatant, &Position, &mut AgentMemory)>()
        {
            if combatant.id == shooter || !self.registry.is_alive(combatant.id) {
                continue;
            }
            let distance = position.0.distance(from);
            if distance <= range && range > 0.0 {
                memory.hear_gunfire(from, 1.0 - distance / range);
            }
        }
        Ok(())
    }

    fn position_of(&self, entity: Entity, id: AgentId) -> Result<DVec2> {
        self.world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .map_err(|_| SimError::UnknownAgent(id))
    }

    fn component_mut<T: hecs::Component>(
        &self,
        entity: Entity,
        id: AgentId,
    ) -> Result<hecs::RefMut<'_, T>> {
        self.world
            .get::<&mut T>(entity)
            .map_err(|_| SimError::UnknownAgent(id))
    }

    fn squad_mut(&mut self, squad: u32) -> Result<&mut SquadState> {
        self.squads
            .get_mut(&squad)
            .ok_or(SimError::UnknownSquad(squad))
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;
        // 1. Snapshot every living agent before any memory changes
        let view = WorldView::capture(&self.world, &self.registry);
        // 2. Squad social aggregates
        systems::squad::run(
            &mut self.world,
            &view,
            &mut self.squads,
            self.config.sight_range,
        );
        // 3. Per-agent decision pipeline
        systems::decision::run(
            &mut self.world,
            &view,
            &self.registry,
            &self.squads,
            self.config.sight_range,
            tick,
            &mut self.events,
        );
        // 4. Cleanup (dead agents)
        systems::cleanup::run(&mut self.world, &self.registry, &mut self.despawn_buffer);
    }
}
