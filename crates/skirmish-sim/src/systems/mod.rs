//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when read-only).
//! Cross-agent reads go through the `WorldView` captured at the start of the
//! tick, never through another agent's live components.

pub mod cleanup;
pub mod decision;
pub mod perception;
pub mod snapshot;
pub mod squad;
