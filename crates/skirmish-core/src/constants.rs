//! Simulation constants and tuning parameters.
//!
//! Every decision-core tuning value lives here, grouped by the component that
//! reads it. Nothing in this module is mutable at runtime.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Threat memory ---

/// Confidence lost per tick since a fact was last observed.
pub const THREAT_CONFIDENCE_DECAY_PER_TICK: f64 = 0.008;

/// Facts at or below this confidence are purged.
pub const THREAT_PURGE_CONFIDENCE: f64 = 0.01;

/// Confidence assigned to a fresh identified sighting.
pub const THREAT_SIGHTED_CONFIDENCE: f64 = 1.0;

/// Confidence of an anonymous fact placed from a squad contact report.
pub const THREAT_SQUAD_CONTACT_CONFIDENCE: f64 = 0.7;

/// Confidence of an anonymous fact placed at the origin of incoming fire.
pub const THREAT_INCOMING_FIRE_CONFIDENCE: f64 = 0.8;

/// Anonymous facts closer than this (meters) are refreshed instead of duplicated.
pub const THREAT_POSITIONAL_MERGE_RADIUS: f64 = 5.0;

/// Maximum facts held per agent; the least confident is evicted beyond this.
pub const THREAT_MEMORY_CAPACITY: usize = 32;

// --- Suppression ---

/// Suppression added by a hit.
pub const SUPPRESSION_HIT_INCREMENT: f64 = 0.25;

/// Suppression added by a near miss.
pub const SUPPRESSION_NEAR_MISS_INCREMENT: f64 = 0.10;

/// Level at which an agent becomes suppressed.
pub const SUPPRESSION_ENTER_THRESHOLD: f64 = 0.30;

/// Level below which a suppressed agent recovers.
pub const SUPPRESSION_CLEAR_THRESHOLD: f64 = 0.22;

/// Per-tick suppression decay (full level clears in ~4 s).
pub const SUPPRESSION_DECAY_PER_TICK: f64 = 1.0 / 240.0;

// --- Combat memory ---

/// Per-tick combat-memory decay (full strength clears in ~60 s).
pub const COMBAT_MEMORY_DECAY_PER_TICK: f64 = 1.0 / 3600.0;

/// Strength above which the agent counts as activated.
pub const COMBAT_MEMORY_ACTIVE_THRESHOLD: f64 = 0.01;

// --- Commitment ---

/// Base commit-phase duration (ticks).
pub const COMMIT_BASE_TICKS: f64 = 60.0;

/// Commit ticks added per `ln(1 + streak)`.
pub const COMMIT_STREAK_TICKS: f64 = 15.0;

/// Commit ticks added at full stress.
pub const COMMIT_STRESS_TICKS: f64 = 30.0;

/// Sustain-phase duration (ticks).
pub const SUSTAIN_TICKS: u64 = 90;

/// Pressure scale applied during the Commit phase.
pub const SHATTER_COMMIT_SCALE: f64 = 0.5;

/// Pressure scale applied during the Review phase.
pub const SHATTER_REVIEW_SCALE: f64 = 1.2;

/// Per-tick shatter pressure decay (~83 ticks to clear from 1.0).
pub const SHATTER_DECAY_PER_TICK: f64 = 1.0 / 83.0;

/// Shatter threshold of a completely green agent.
pub const SHATTER_THRESHOLD_MIN: f64 = 0.35;

/// Threshold added per unit of discipline.
pub const SHATTER_THRESHOLD_DISCIPLINE_SPAN: f64 = 0.45;

/// Decision debt added on every goal switch.
pub const DECISION_DEBT_PER_SWITCH: f64 = 1.0;

/// Upper bound on accumulated decision debt.
pub const DECISION_DEBT_MAX: f64 = 3.0;

/// Per-tick decision debt decay (~180 ticks to clear one switch).
pub const DECISION_DEBT_DECAY_PER_TICK: f64 = 1.0 / 180.0;

/// Hysteresis margin with no streak and no debt.
pub const HYSTERESIS_BASE: f64 = 0.12;

/// Margin added per consecutive re-selection of the same goal.
pub const HYSTERESIS_PER_STREAK: f64 = 0.02;

/// Margin added per unit of decision debt.
pub const HYSTERESIS_PER_DEBT: f64 = 0.08;

/// Hard cap on the hysteresis margin.
pub const HYSTERESIS_MAX: f64 = 0.40;

// --- Shatter sources ---

pub const SHATTER_ON_HIT: f64 = 0.6;
pub const SHATTER_ON_NEAR_MISS: f64 = 0.12;
pub const SHATTER_ON_NEW_CONTACT: f64 = 0.3;
pub const SHATTER_ON_CONTACT_LOST: f64 = 0.2;
pub const SHATTER_ON_ORDER: f64 = 0.45;

// --- Stress ---

pub const STRESS_SUPPRESSION_WEIGHT: f64 = 0.5;
pub const STRESS_FEAR_WEIGHT: f64 = 0.3;
pub const STRESS_FIRE_WEIGHT: f64 = 0.2;

/// Incoming rounds per tick that saturate the fire term of stress.
pub const STRESS_FIRE_SATURATION: f64 = 5.0;

/// Per-tick retention of the recent incoming-fire accumulator.
pub const RECENT_FIRE_RETENTION: f64 = 0.98;

// --- Shooting ---

/// Consecutive misses that force a re-evaluation.
pub const BURST_MISS_LIMIT: u32 = 3;

/// Momentum step per shot outcome.
pub const SHOT_MOMENTUM_STEP: f64 = 0.25;

/// Per-tick momentum decay toward zero.
pub const SHOT_MOMENTUM_DECAY_PER_TICK: f64 = 1.0 / 600.0;

/// Range (meters) beyond which a shot counts as long range.
pub const LONG_RANGE_DISTANCE: f64 = 60.0;

// --- Personal thresholds ---

pub const ENGAGE_SHOT_QUALITY_DEFAULT: f64 = 0.45;
pub const ENGAGE_SHOT_QUALITY_RANGE: (f64, f64) = (0.2, 0.8);

pub const LONG_RANGE_SHOT_QUALITY_DEFAULT: f64 = 0.6;
pub const LONG_RANGE_SHOT_QUALITY_RANGE: (f64, f64) = (0.35, 0.9);

pub const PUSH_ON_MISS_MOMENTUM_DEFAULT: f64 = 0.3;
pub const PUSH_ON_MISS_MOMENTUM_RANGE: (f64, f64) = (0.05, 0.7);

pub const HOLD_ON_HIT_MOMENTUM_DEFAULT: f64 = 0.4;
pub const HOLD_ON_HIT_MOMENTUM_RANGE: (f64, f64) = (0.15, 0.8);

pub const COVER_FEAR_DEFAULT: f64 = 0.55;
pub const COVER_FEAR_RANGE: (f64, f64) = (0.25, 0.85);

/// Ticks for a threshold to drift across its full clamp range.
pub const THRESHOLD_TRAVERSAL_TICKS: f64 = 300.0;

/// Largest elapsed span credited to one evolution step (ticks). Covers a
/// full commit plus sustain cycle at maximum stress with room for streaks.
pub const THRESHOLD_MAX_STEP_TICKS: u64 = 240;

/// Fraction of the gap to default closed per tick at full stress.
pub const THRESHOLD_STRESS_RESET_PER_TICK: f64 = 0.004;

/// Recent incoming fire that saturates the cover-fear drift.
pub const THRESHOLD_FIRE_SATURATION: f64 = 10.0;

// --- Peek ---

pub const PEEK_COOLDOWN_TICKS: u64 = 120;
pub const PEEK_NO_CONTACT_PENALTY: f64 = 0.15;
pub const PEEK_PENALTY_MAX: f64 = 0.6;
pub const PEEK_PENALTY_DECAY_PER_TICK: f64 = 1.0 / 1800.0;

/// Moving farther than this (meters) from the last peek spot clears the penalty.
pub const PEEK_SPOT_RADIUS: f64 = 5.0;

// --- Utility ---

/// Floor of the Advance utility so some goal is always selectable.
pub const ADVANCE_BASELINE: f64 = 0.05;

/// Scale of an officer order's bias (priority × strength × compliance).
pub const ORDER_WEIGHT: f64 = 0.5;

pub const COMPLIANCE_MIN: f64 = 0.1;
pub const COMPLIANCE_MAX: f64 = 1.0;

/// Utility shifted per unit of squad posture.
pub const POSTURE_WEIGHT: f64 = 0.15;

/// Isolation ticks at which the regroup push saturates.
pub const ISOLATION_FULL_TICKS: f64 = 180.0;

/// Visible allies at which ally support saturates.
pub const ALLY_SUPPORT_FULL: f64 = 4.0;

/// Memory-only scaling of MoveToContact by memory strength.
pub const MOVE_TO_CONTACT_MEMORY_SCALE: f64 = 0.8;

/// Memory-only scaling of Overwatch by memory strength.
pub const OVERWATCH_MEMORY_SCALE: f64 = 0.9;

/// Memory-only scaling of Flank by memory strength.
pub const FLANK_MEMORY_SCALE: f64 = 0.7;

/// Fear-dependent addend of the Flank memory-only scale.
pub const FLANK_MEMORY_FEAR_TERM: f64 = 0.1;

/// Distance (meters) a fallback retreats from the contact.
pub const FALLBACK_DISTANCE: f64 = 20.0;

// --- Engine ---

/// Default sight range (meters).
pub const DEFAULT_SIGHT_RANGE: f64 = 120.0;

/// Default gunfire hearing range (meters).
pub const DEFAULT_HEARING_RANGE: f64 = 150.0;

/// Allies within this range (meters) count as visible support.
pub const ALLY_SUPPORT_RANGE: f64 = 25.0;

/// Allies within this range (meters) count toward crowding.
pub const CROWDING_RADIUS: f64 = 3.0;

/// Crowding allies at which crowding pressure saturates.
pub const CROWDING_FULL: f64 = 4.0;
