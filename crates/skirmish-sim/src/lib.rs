//! Headless squad skirmish simulation.
//!
//! Owns the hecs ECS world, feeds perception and orchestrator state into
//! each agent's decision pipeline once per tick, and produces `SimSnapshot`s.

pub mod engine;
pub mod error;
pub mod registry;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use error::{Result, SimError};
pub use scenario::{AgentSpec, Scenario, SquadSpec};

#[cfg(test)]
mod tests;
