//! Core types and definitions for the SKIRMISH squad-combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! external-input records, commands, snapshots, events, and the tuning
//! constants of the per-agent decision core. It has no dependency on the
//! ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
