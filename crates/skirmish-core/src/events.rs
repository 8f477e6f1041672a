//! Events emitted by the decision core for logging and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::AgentId;

/// Decision events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionEvent {
    /// A review switched the agent's goal.
    GoalChanged {
        agent: AgentId,
        from: Goal,
        to: Goal,
        cause: ReviewCause,
        tick: u64,
    },
    /// A better-scoring goal lost to the hysteresis margin.
    GoalHeld {
        agent: AgentId,
        held: Goal,
        rejected: Goal,
        margin: f64,
        tick: u64,
    },
    /// A review ran outside the scheduled window.
    ForcedReview {
        agent: AgentId,
        cause: ReviewCause,
        tick: u64,
    },
}

impl DecisionEvent {
    pub fn agent(&self) -> AgentId {
        match self {
            DecisionEvent::GoalChanged { agent, .. }
            | DecisionEvent::GoalHeld { agent, .. }
            | DecisionEvent::ForcedReview { agent, .. } => *agent,
        }
    }
}
