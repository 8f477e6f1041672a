//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavioral goal held by an agent. The sole externally visible decision output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// Move toward the objective. The fallback goal.
    #[default]
    Advance,
    /// Keep station within the squad formation.
    MaintainFormation,
    /// Close distance with the rest of the squad.
    Regroup,
    /// Stay put and cover the current sector.
    HoldPosition,
    /// Self-preservation: get down, get to cover.
    Survive,
    /// Fire on a visible enemy.
    Engage,
    /// Move toward a known but unseen (or poorly seen) contact.
    MoveToContact,
    /// Withdraw away from the contact.
    Fallback,
    /// Work around the side of a contact.
    Flank,
    /// Watch a long sightline from a good position.
    Overwatch,
    /// Briefly expose from a corner or window to look for contact.
    Peek,
}

impl Goal {
    pub const COUNT: usize = 11;

    /// Every goal, in scoring order. Earlier goals win exact ties.
    pub const ALL: [Goal; Goal::COUNT] = [
        Goal::Advance,
        Goal::MaintainFormation,
        Goal::Regroup,
        Goal::HoldPosition,
        Goal::Survive,
        Goal::Engage,
        Goal::MoveToContact,
        Goal::Fallback,
        Goal::Flank,
        Goal::Overwatch,
        Goal::Peek,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Goals that actively prosecute a fight.
    pub fn is_fighting(self) -> bool {
        matches!(self, Goal::Engage | Goal::MoveToContact | Goal::Flank)
    }

    /// Goals that move away from danger.
    pub fn is_retreating(self) -> bool {
        matches!(self, Goal::Fallback | Goal::Survive)
    }

    /// Goals that keep the agent static.
    pub fn is_holding(self) -> bool {
        matches!(self, Goal::HoldPosition | Goal::Overwatch)
    }
}

/// Squad-level intent set by the squad orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadIntent {
    #[default]
    Advance,
    Hold,
    Assault,
    Regroup,
    Withdraw,
}

/// Kind of order issued by an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Advance,
    /// Move to the order's target position.
    MoveTo,
    Hold,
    Regroup,
    Fallback,
    Flank,
    Engage,
    Overwatch,
}

impl OrderKind {
    /// The goal this order pushes an agent toward.
    pub fn goal(self) -> Goal {
        match self {
            OrderKind::Advance | OrderKind::MoveTo => Goal::Advance,
            OrderKind::Hold => Goal::HoldPosition,
            OrderKind::Regroup => Goal::Regroup,
            OrderKind::Fallback => Goal::Fallback,
            OrderKind::Flank => Goal::Flank,
            OrderKind::Engage => Goal::Engage,
            OrderKind::Overwatch => Goal::Overwatch,
        }
    }
}

/// Commitment phase, a pure function of ticks since the commitment began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitPhase {
    /// Resistant to disruption.
    Commit,
    /// Normal sensitivity.
    Sustain,
    /// Re-evaluation due.
    #[default]
    Review,
}

/// Why a goal review ran this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewCause {
    /// The commitment reached its Review phase.
    Scheduled,
    /// Accumulated shatter pressure crossed the agent's threshold.
    Shatter,
    /// Suppression crossed the enter threshold this tick.
    SuppressionSpike,
    /// Three consecutive missed shots.
    BurstMiss,
}

impl ReviewCause {
    /// Whether the review ran outside the scheduled window.
    pub fn is_forced(self) -> bool {
        !matches!(self, ReviewCause::Scheduled)
    }
}

/// Side chosen for a flanking move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlankSide {
    Left,
    Right,
}

/// Opposing sides of the skirmish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Blue,
    Red,
}

impl Team {
    pub fn opposes(self, other: Team) -> bool {
        self != other
    }
}
