//! Commitment controller: the anti-oscillation state machine.
//!
//! A commitment runs Commit → Sustain → Review purely on elapsed ticks.
//! Outside Review, a re-evaluation needs accumulated shatter pressure to
//! cross the agent's threshold, and any switch must beat the hysteresis
//! margin, which grows with goal streak and decision debt.

use skirmish_core::constants::*;
use skirmish_core::enums::CommitPhase;

#[derive(Debug, Clone)]
pub struct CommitmentController {
    pressure: f64,
    /// Fixed at creation from discipline.
    threshold: f64,
    phase_start_tick: u64,
    commit_ticks: u64,
    sustain_ticks: u64,
    debt: f64,
    margin: f64,
    streak: u32,
}

impl CommitmentController {
    /// Create a controller for an agent with the given discipline.
    ///
    /// Disciplined agents (0.55..=1.0) land in 0.6..=0.8, green agents
    /// (0..=0.33) in 0.35..=0.5. The first `phase` query reports Review.
    pub fn new(discipline: f64) -> Self {
        Self {
            pressure: 0.0,
            threshold: SHATTER_THRESHOLD_MIN
                + SHATTER_THRESHOLD_DISCIPLINE_SPAN * discipline.clamp(0.0, 1.0),
            phase_start_tick: 0,
            commit_ticks: 0,
            sustain_ticks: 0,
            debt: 0.0,
            margin: HYSTERESIS_BASE,
            streak: 0,
        }
    }

    pub fn phase(&self, tick: u64) -> CommitPhase {
        let elapsed = tick.saturating_sub(self.phase_start_tick);
        if elapsed < self.commit_ticks {
            CommitPhase::Commit
        } else if elapsed < self.commit_ticks + self.sustain_ticks {
            CommitPhase::Sustain
        } else {
            CommitPhase::Review
        }
    }

    pub fn add_shatter_pressure(&mut self, amount: f64, tick: u64) {
        let scale = match self.phase(tick) {
            CommitPhase::Commit => SHATTER_COMMIT_SCALE,
            CommitPhase::Sustain => 1.0,
            CommitPhase::Review => SHATTER_REVIEW_SCALE,
        };
        self.pressure += amount.max(0.0) * scale;
    }

    pub fn decay_shatter_pressure(&mut self) {
        self.pressure = (self.pressure - SHATTER_DECAY_PER_TICK).max(0.0);
    }

    /// True when pressure has reached the threshold; consumes the pressure.
    pub fn shatter_ready(&mut self) -> bool {
        if self.pressure >= self.threshold {
            tracing::trace!(
                pressure = self.pressure,
                threshold = self.threshold,
                "shatter gate opened"
            );
            self.pressure = 0.0;
            true
        } else {
            false
        }
    }

    /// Start a new commitment at `tick` on the goal just selected.
    pub fn begin(&mut self, tick: u64, same_goal: bool, stress: f64) {
        self.pressure = 0.0;
        if same_goal {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.debt = (self.debt + DECISION_DEBT_PER_SWITCH).min(DECISION_DEBT_MAX);
            self.streak = 0;
        }

        let commit = COMMIT_BASE_TICKS
            + (self.streak as f64).ln_1p() * COMMIT_STREAK_TICKS
            + stress.clamp(0.0, 1.0) * COMMIT_STRESS_TICKS;
        self.commit_ticks = commit.round() as u64;
        self.sustain_ticks = SUSTAIN_TICKS;
        self.phase_start_tick = tick;
        self.margin = (HYSTERESIS_BASE
            + self.streak as f64 * HYSTERESIS_PER_STREAK
            + self.debt * HYSTERESIS_PER_DEBT)
            .min(HYSTERESIS_MAX);
    }

    pub fn decay_decision_debt(&mut self) {
        self.debt = (self.debt - DECISION_DEBT_DECAY_PER_TICK).max(0.0);
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn decision_debt(&self) -> f64 {
        self.debt
    }

    pub fn hysteresis_margin(&self) -> f64 {
        self.margin
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn commit_ticks(&self) -> u64 {
        self.commit_ticks
    }

    pub fn sustain_ticks(&self) -> u64 {
        self.sustain_ticks
    }

    pub fn phase_start_tick(&self) -> u64 {
        self.phase_start_tick
    }
}
