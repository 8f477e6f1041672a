//! Personal thresholds and their slow evolution.
//!
//! Each review nudges the five thresholds toward whatever reinforces the
//! goal the agent is already pursuing. Stress pulls every threshold back
//! toward its default so no drift becomes permanent.

use skirmish_core::constants::*;
use skirmish_core::enums::Goal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalThresholds {
    /// Minimum hit chance worth engaging at normal range.
    pub engage_shot_quality: f64,
    /// Minimum hit chance worth engaging at long range.
    pub long_range_shot_quality: f64,
    /// Negative shot momentum beyond which the agent pushes closer.
    pub push_on_miss_momentum: f64,
    /// Positive shot momentum beyond which the agent stays and keeps firing.
    pub hold_on_hit_momentum: f64,
    /// Panic level above which the agent prefers cover to fighting.
    pub cover_fear: f64,
}

impl Default for PersonalThresholds {
    fn default() -> Self {
        Self {
            engage_shot_quality: ENGAGE_SHOT_QUALITY_DEFAULT,
            long_range_shot_quality: LONG_RANGE_SHOT_QUALITY_DEFAULT,
            push_on_miss_momentum: PUSH_ON_MISS_MOMENTUM_DEFAULT,
            hold_on_hit_momentum: HOLD_ON_HIT_MOMENTUM_DEFAULT,
            cover_fear: COVER_FEAR_DEFAULT,
        }
    }
}

impl PersonalThresholds {
    pub fn clamp_to_ranges(&mut self) {
        let clamp = |v: f64, (lo, hi): (f64, f64)| v.clamp(lo, hi);
        self.engage_shot_quality = clamp(self.engage_shot_quality, ENGAGE_SHOT_QUALITY_RANGE);
        self.long_range_shot_quality =
            clamp(self.long_range_shot_quality, LONG_RANGE_SHOT_QUALITY_RANGE);
        self.push_on_miss_momentum =
            clamp(self.push_on_miss_momentum, PUSH_ON_MISS_MOMENTUM_RANGE);
        self.hold_on_hit_momentum = clamp(self.hold_on_hit_momentum, HOLD_ON_HIT_MOMENTUM_RANGE);
        self.cover_fear = clamp(self.cover_fear, COVER_FEAR_RANGE);
    }

    pub fn within_ranges(&self) -> bool {
        let inside = |v: f64, (lo, hi): (f64, f64)| (lo..=hi).contains(&v);
        inside(self.engage_shot_quality, ENGAGE_SHOT_QUALITY_RANGE)
            && inside(self.long_range_shot_quality, LONG_RANGE_SHOT_QUALITY_RANGE)
            && inside(self.push_on_miss_momentum, PUSH_ON_MISS_MOMENTUM_RANGE)
            && inside(self.hold_on_hit_momentum, HOLD_ON_HIT_MOMENTUM_RANGE)
            && inside(self.cover_fear, COVER_FEAR_RANGE)
    }
}

/// What the agent has been doing since the last evolution step.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionInputs {
    pub goal: Goal,
    /// Decaying count of recent incoming rounds.
    pub recent_fire: f64,
    /// Shot momentum in [-1, 1].
    pub momentum: f64,
    /// Situational stress in [0, 1].
    pub stress: f64,
    /// Tick the goal being reinforced was committed to. Only read on the
    /// first step, when there is no previous step to measure from.
    pub committed_at: u64,
}

/// Lazily initialized thresholds plus the bookkeeping to evolve them.
#[derive(Debug, Clone, Default)]
pub struct ThresholdEvolution {
    values: Option<PersonalThresholds>,
    last_evolved_tick: Option<u64>,
}

impl ThresholdEvolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current thresholds; defaults until first written.
    pub fn get(&self) -> PersonalThresholds {
        self.values.unwrap_or_default()
    }

    pub fn values_mut(&mut self) -> &mut PersonalThresholds {
        self.values.get_or_insert_with(PersonalThresholds::default)
    }

    pub fn is_initialized(&self) -> bool {
        self.values.is_some()
    }

    /// Drift every threshold for the ticks elapsed since the previous step.
    pub fn evolve(&mut self, inputs: EvolutionInputs, tick: u64) {
        let since = self.last_evolved_tick.unwrap_or(inputs.committed_at);
        let elapsed = tick.saturating_sub(since).min(THRESHOLD_MAX_STEP_TICKS) as f64;
        self.last_evolved_tick = Some(tick);

        let step = |(lo, hi): (f64, f64)| (hi - lo) / THRESHOLD_TRAVERSAL_TICKS * elapsed;
        let engage = step(ENGAGE_SHOT_QUALITY_RANGE);
        let long_range = step(LONG_RANGE_SHOT_QUALITY_RANGE);
        let push = step(PUSH_ON_MISS_MOMENTUM_RANGE);
        let cover = step(COVER_FEAR_RANGE);

        let t = self.values_mut();
        let push_on_miss = t.push_on_miss_momentum;

        if inputs.goal.is_fighting() {
            t.engage_shot_quality -= engage;
            t.long_range_shot_quality -= long_range;
            t.push_on_miss_momentum += push;
        } else if inputs.goal.is_retreating() {
            t.cover_fear -= cover;
            t.engage_shot_quality += engage;
        } else if inputs.goal.is_holding() {
            t.engage_shot_quality -= engage;
            t.cover_fear += cover * 0.5;
        }

        let fire = (inputs.recent_fire / THRESHOLD_FIRE_SATURATION).clamp(0.0, 1.0);
        t.cover_fear -= cover * fire;

        let momentum = inputs.momentum.clamp(-1.0, 1.0);
        if momentum > 0.0 {
            t.engage_shot_quality -= engage * momentum;
        } else if momentum < -push_on_miss {
            t.long_range_shot_quality += long_range * -momentum;
        }

        let pull = (inputs.stress.clamp(0.0, 1.0) * THRESHOLD_STRESS_RESET_PER_TICK * elapsed)
            .min(1.0);
        let defaults = PersonalThresholds::default();
        let toward = |v: &mut f64, d: f64| *v += (d - *v) * pull;
        toward(&mut t.engage_shot_quality, defaults.engage_shot_quality);
        toward(&mut t.long_range_shot_quality, defaults.long_range_shot_quality);
        toward(&mut t.push_on_miss_momentum, defaults.push_on_miss_momentum);
        toward(&mut t.hold_on_hit_momentum, defaults.hold_on_hit_momentum);
        toward(&mut t.cover_fear, defaults.cover_fear);

        t.clamp_to_ranges();
    }
}
