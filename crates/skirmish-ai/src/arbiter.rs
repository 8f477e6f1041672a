//! Goal arbitration.
//!
//! [`select_goal`] is the stateless top scorer. [`select_goal_with_hysteresis`]
//! is what the tick pipeline uses: the top scorer only replaces the held goal
//! when it wins by at least the commitment margin.

use skirmish_core::enums::Goal;

use crate::memory::AgentMemory;
use crate::utility::{score_goals, DecisionContext, GoalScores};

/// Outcome of one hysteresis-gated arbitration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Goal to hold after this review.
    pub goal: Goal,
    /// Raw top scorer.
    pub candidate: Goal,
    pub candidate_utility: f64,
    /// Utility of the goal held going in.
    pub current_utility: f64,
    /// Margin the candidate had to beat.
    pub margin: f64,
    /// True when the candidate differed but fell short of the margin.
    pub held: bool,
}

/// Raw max-utility goal. Ignores the currently held goal.
pub fn select_goal(memory: &AgentMemory, ctx: &DecisionContext) -> Goal {
    score_goals(memory, ctx).best().0
}

/// Apply the switch law to an already scored table.
///
/// Switches when `candidate - current >= margin`. A held goal that is now
/// gated out scores negative infinity and always loses.
pub fn arbitrate(scores: &GoalScores, current: Goal, margin: f64) -> Selection {
    let (candidate, candidate_utility) = scores.best();
    let current_utility = scores.get(current);

    if candidate == current {
        return Selection {
            goal: current,
            candidate,
            candidate_utility,
            current_utility,
            margin,
            held: false,
        };
    }

    let switch = candidate_utility - current_utility >= margin;
    Selection {
        goal: if switch { candidate } else { current },
        candidate,
        candidate_utility,
        current_utility,
        margin,
        held: !switch,
    }
}

/// Hysteresis-gated selection against the goal currently held.
pub fn select_goal_with_hysteresis(
    memory: &AgentMemory,
    ctx: &DecisionContext,
    current: Goal,
    margin: f64,
) -> Selection {
    let scores = score_goals(memory, ctx);
    let selection = arbitrate(&scores, current, margin);

    tracing::debug!(
        agent = %ctx.agent,
        current = ?current,
        candidate = ?selection.candidate,
        candidate_utility = selection.candidate_utility,
        current_utility = selection.current_utility,
        margin,
        held = selection.held,
        "arbitrated goal"
    );
    selection
}
