//! Per-agent tactical decision core for SKIRMISH.
//!
//! Fuses sightings, gunfire and squad reports into private working memory
//! and selects one goal per agent per review. A commitment layer (phases,
//! shatter pressure, hysteresis, decision debt) keeps that choice stable
//! under noisy inputs.

pub mod arbiter;
pub mod combat_memory;
pub mod commitment;
pub mod memory;
pub mod peek;
pub mod shooting;
pub mod step;
pub mod suppression;
pub mod thresholds;
pub mod threat_memory;
pub mod utility;

pub use skirmish_core as core;

pub use arbiter::{arbitrate, select_goal, select_goal_with_hysteresis, Selection};
pub use memory::{AgentMemory, DecisionOutputs};
pub use step::{step, StepReport};
pub use threat_memory::AgentLiveness;
pub use utility::{score_goals, DecisionContext, GoalScores};
