//! Utility evaluation for every goal.
//!
//! One pass over the rule set produces a [`GoalScores`] table. Both the raw
//! arbiter and the hysteresis wrapper read from that table, so the two never
//! disagree on a goal's score.

use glam::DVec2;

use skirmish_core::components::{AgentProfile, SquadInputs, TacticalInputs};
use skirmish_core::constants::*;
use skirmish_core::enums::{Goal, SquadIntent};
use skirmish_core::types::AgentId;

use crate::memory::AgentMemory;
use crate::thresholds::PersonalThresholds;

/// Everything outside the agent's memory that the evaluator reads.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext {
    pub agent: AgentId,
    pub tick: u64,
    pub position: DVec2,
    pub profile: AgentProfile,
    pub squad: SquadInputs,
    pub tactical: TacticalInputs,
    /// Resolver's hit-chance estimate against the best current target.
    pub hit_chance: f64,
}

impl DecisionContext {
    pub fn new(agent: AgentId, tick: u64, position: DVec2, profile: AgentProfile) -> Self {
        Self {
            agent,
            tick,
            position,
            profile,
            squad: SquadInputs::default(),
            tactical: TacticalInputs::default(),
            hit_chance: 0.0,
        }
    }
}

/// Utility per goal. Gated goals hold `f64::NEG_INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalScores {
    scores: [f64; Goal::COUNT],
}

impl Default for GoalScores {
    fn default() -> Self {
        Self {
            scores: [f64::NEG_INFINITY; Goal::COUNT],
        }
    }
}

impl GoalScores {
    pub fn get(&self, goal: Goal) -> f64 {
        self.scores[goal.index()]
    }

    pub fn set(&mut self, goal: Goal, utility: f64) {
        self.scores[goal.index()] = utility;
    }

    pub fn is_eligible(&self, goal: Goal) -> bool {
        self.get(goal).is_finite()
    }

    /// Strictly greatest utility; earlier goals win exact ties, so Advance is
    /// the default.
    pub fn best(&self) -> (Goal, f64) {
        let mut best = (Goal::Advance, self.get(Goal::Advance));
        for goal in Goal::ALL.iter().skip(1) {
            let utility = self.get(*goal);
            if utility > best.1 {
                best = (*goal, utility);
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Goal, f64)> + '_ {
        Goal::ALL.iter().map(|g| (*g, self.get(*g)))
    }
}

/// Quantities derived once per evaluation and shared by every goal rule.
struct Situation {
    visual: bool,
    any_contact: bool,
    memory_only: bool,
    /// Strongest of the gunfire memory and the best remembered fact.
    memory_strength: f64,
    suppressed: bool,
    suppression: f64,
    supp_penalty: f64,
    panic: f64,
    compliance: f64,
    offense: f64,
    ally_support: f64,
    isolation: f64,
    crowding: f64,
    outnumbered: f64,
    fear_rising: f64,
    hit_chance: f64,
    momentum: f64,
    good_shot: bool,
    poor_long_shot: bool,
    pushing: bool,
    hit_streak: bool,
    take_cover: bool,
    recent_fire: f64,
}

impl Situation {
    fn assess(memory: &AgentMemory, ctx: &DecisionContext, t: &PersonalThresholds) -> Self {
        let skills = ctx.profile.skills;
        let psych = ctx.profile.psych;
        let discipline = skills.discipline.clamp(0.0, 1.0);
        let fear = psych.fear.clamp(0.0, 1.0);
        let composure = psych.composure.clamp(0.0, 1.0);
        let experience = psych.experience.clamp(0.0, 1.0);
        let social = ctx.squad.social;

        let suppression = memory.suppression.level();
        let supp_penalty = suppression * (1.0 - 0.6 * discipline);
        let panic = (fear * (1.0 - 0.5 * composure) * (1.0 - 0.4 * experience)
            + 0.2 * social.squad_avg_fear.clamp(0.0, 1.0) * (1.0 - composure)
            + 0.3 * suppression * (1.0 - discipline))
            .clamp(0.0, 1.0);
        let compliance =
            (0.4 + 0.6 * discipline - 0.4 * fear).clamp(COMPLIANCE_MIN, COMPLIANCE_MAX);

        let visual = memory.threats.visible_count() > 0;
        let squad_contact = ctx.squad.shared_contact.is_some();
        let audio = memory.combat.is_activated();
        let remembered = memory.threats.has_remembered_contact();
        let closest = memory
            .threats
            .closest_visible_dist(ctx.position.x, ctx.position.y);

        let hit_chance = ctx.hit_chance.clamp(0.0, 1.0);
        let momentum = memory.shots.momentum();
        let poor_long_shot =
            visual && closest > LONG_RANGE_DISTANCE && hit_chance < t.long_range_shot_quality;

        Self {
            visual,
            any_contact: visual || squad_contact || audio || remembered,
            memory_only: !visual && !squad_contact && (audio || remembered),
            memory_strength: memory.combat.strength().max(
                memory
                    .threats
                    .strongest_remembered()
                    .map_or(0.0, |f| f.confidence),
            ),
            suppressed: memory.suppression.is_suppressed(),
            suppression,
            supp_penalty,
            panic,
            compliance,
            offense: ctx.squad.posture.clamp(-1.0, 1.0) * POSTURE_WEIGHT,
            ally_support: (social.visible_allies as f64 / ALLY_SUPPORT_FULL).min(1.0),
            isolation: (social.isolation_ticks as f64 / ISOLATION_FULL_TICKS).min(1.0),
            crowding: social.crowding.clamp(0.0, 1.0),
            outnumbered: (social.outnumbered - 1.0).clamp(0.0, 1.0),
            fear_rising: (social.squad_fear_delta * 10.0).clamp(0.0, 1.0),
            hit_chance,
            momentum,
            good_shot: visual && !poor_long_shot && hit_chance >= t.engage_shot_quality,
            poor_long_shot,
            pushing: momentum < -t.push_on_miss_momentum,
            hit_streak: momentum > t.hold_on_hit_momentum,
            take_cover: panic > t.cover_fear,
            recent_fire: memory.recent_fire() + memory.incoming_fire() as f64,
        }
    }

    fn bonus(flag: bool, amount: f64) -> f64 {
        if flag {
            amount
        } else {
            0.0
        }
    }
}

/// Score every goal for the agent's current memory and inputs.
pub fn score_goals(memory: &AgentMemory, ctx: &DecisionContext) -> GoalScores {
    let thresholds = memory.thresholds.get();
    let s = Situation::assess(memory, ctx, &thresholds);
    let skills = ctx.profile.skills;
    let psych = ctx.profile.psych;
    let discipline = skills.discipline.clamp(0.0, 1.0);
    let fieldcraft = skills.fieldcraft.clamp(0.0, 1.0);
    let marksmanship = skills.marksmanship.clamp(0.0, 1.0);
    let morale = psych.morale.clamp(0.0, 1.0);
    let fear = psych.fear.clamp(0.0, 1.0);
    let intent = ctx.squad.intent;
    let flags = ctx.tactical.flags;
    let path = ctx.tactical.path_available;

    let active_order = ctx.squad.order.filter(|o| o.is_active(ctx.tick));
    let order_bias = |goal: Goal| match active_order {
        Some(order) if order.kind.goal() == goal => {
            order.priority.clamp(0.0, 1.0) * order.strength.clamp(0.0, 1.0) * s.compliance
                * ORDER_WEIGHT
        }
        _ => 0.0,
    };
    let order_is = |goal: Goal| active_order.is_some_and(|o| o.kind.goal() == goal);
    let bonus = Situation::bonus;

    let mut scores = GoalScores::default();

    // Advance: always eligible, floored at the baseline.
    let advance = 0.2 + 0.1 * morale + 0.15 * s.ally_support + s.offense
        - 0.3 * s.panic
        - 0.4 * s.supp_penalty
        + order_bias(Goal::Advance)
        + match intent {
            SquadIntent::Advance => 0.2,
            SquadIntent::Assault => 0.1,
            SquadIntent::Hold => -0.1,
            SquadIntent::Withdraw => -0.2,
            SquadIntent::Regroup => 0.0,
        }
        - bonus(s.visual, 0.2)
        - bonus(!path, 0.2);
    scores.set(Goal::Advance, advance.max(ADVANCE_BASELINE));

    if !s.visual {
        let formation = 0.1 + 0.2 * discipline + 0.1 * s.fear_rising + 0.1 * s.isolation
            - 0.15 * s.crowding
            - 0.2 * s.supp_penalty
            + bonus(intent == SquadIntent::Advance, 0.1);
        scores.set(Goal::MaintainFormation, formation);
    }

    if s.isolation > 0.0 || intent == SquadIntent::Regroup || order_is(Goal::Regroup) {
        let regroup = 0.1 + 0.5 * s.isolation + 0.1 * fear
            + bonus(intent == SquadIntent::Regroup, 0.35)
            + order_bias(Goal::Regroup)
            - bonus(s.visual, 0.2)
            - bonus(!path, 0.2);
        scores.set(Goal::Regroup, regroup);
    }

    let hold = 0.1 + 0.2 * discipline - s.offense
        + match intent {
            SquadIntent::Hold => 0.35,
            SquadIntent::Assault => -0.15,
            SquadIntent::Withdraw => -0.1,
            _ => 0.0,
        }
        + 0.1 * s.fear_rising
        + 0.1 * s.suppression
        + bonus(flags.wall || flags.interior, 0.1)
        - 0.1 * s.crowding
        + order_bias(Goal::HoldPosition)
        + bonus(s.visual && s.hit_streak, 0.1)
        + bonus(!path, 0.15);
    scores.set(Goal::HoldPosition, hold);

    if s.visual || s.suppression > 0.05 || s.recent_fire > 0.5 {
        let survive = 0.9 * s.panic + 0.4 * s.supp_penalty + 0.1 * (1.0 - morale)
            - 0.2 * discipline
            + bonus(s.take_cover, 0.15);
        scores.set(Goal::Survive, survive);
    }

    if s.visual {
        let engage = 0.35 + 0.2 * marksmanship + 0.3 * s.hit_chance + 0.1 * s.momentum
            - 0.5 * s.panic
            - 0.5 * s.supp_penalty
            + order_bias(Goal::Engage)
            + bonus(intent == SquadIntent::Assault, 0.1)
            + if s.good_shot { 0.2 } else { -0.1 }
            - bonus(s.poor_long_shot, 0.2)
            + bonus(s.hit_streak, 0.1)
            - bonus(s.take_cover, 0.15);
        scores.set(Goal::Engage, engage);
    }

    let closing_in = s.any_contact && (!s.visual || s.poor_long_shot) && path;

    if closing_in {
        let mut base = 0.3 + 0.1 * fieldcraft + 0.15 * s.ally_support + s.offense
            + match intent {
                SquadIntent::Assault => 0.2,
                SquadIntent::Advance => 0.05,
                SquadIntent::Hold => -0.15,
                SquadIntent::Withdraw => -0.3,
                SquadIntent::Regroup => 0.0,
            }
            + bonus(s.pushing, 0.15);
        if s.memory_only {
            base *= s.memory_strength * MOVE_TO_CONTACT_MEMORY_SCALE;
        }
        scores.set(
            Goal::MoveToContact,
            base - 0.4 * s.panic - 0.5 * s.supp_penalty,
        );
    }

    if s.any_contact || intent == SquadIntent::Withdraw || order_is(Goal::Fallback) {
        let mut fallback = 0.1 + 0.45 * s.panic + 0.3 * s.supp_penalty + 0.25 * s.outnumbered
            + 0.15 * (1.0 - morale)
            - 0.1 * discipline
            + bonus(intent == SquadIntent::Withdraw, 0.4)
            + order_bias(Goal::Fallback)
            - s.offense;
        if !path {
            fallback *= 0.5;
        }
        scores.set(Goal::Fallback, fallback);
    }

    if closing_in && !s.suppressed {
        let mut base = 0.2 + 0.3 * fieldcraft + 0.1 * s.ally_support + 0.1 * s.crowding
            + s.offense
            + order_bias(Goal::Flank)
            + bonus(s.pushing, 0.1)
            + bonus(intent == SquadIntent::Assault, 0.1);
        if s.memory_only {
            base *= s.memory_strength * FLANK_MEMORY_SCALE + FLANK_MEMORY_FEAR_TERM * (1.0 - fear);
        }
        scores.set(Goal::Flank, base - 0.4 * s.panic - 0.6 * s.supp_penalty);
    }

    let sightline = ctx.tactical.sightline.clamp(0.0, 1.0);
    if s.any_contact || sightline > 0.6 {
        let mut base = 0.15 + 0.35 * sightline + 0.15 * marksmanship + 0.1 * discipline
            + bonus(flags.window, 0.1)
            + bonus(intent == SquadIntent::Hold, 0.1)
            + order_bias(Goal::Overwatch)
            - 0.05 * s.crowding
            + bonus(s.visual, 0.1 * s.hit_chance);
        if s.memory_only {
            base *= s.memory_strength * OVERWATCH_MEMORY_SCALE;
        }
        scores.set(Goal::Overwatch, base - 0.3 * s.panic - 0.3 * s.supp_penalty);
    }

    if memory.peek.is_ready(ctx.tick)
        && !s.suppressed
        && !s.visual
        && (flags.corner || flags.window)
    {
        let peek = 0.25 + 0.2 * fieldcraft + bonus(s.any_contact, 0.15)
            - memory.peek.penalty()
            - 0.3 * s.panic;
        scores.set(Goal::Peek, peek);
    }

    tracing::trace!(
        agent = %ctx.agent,
        tick = ctx.tick,
        panic = s.panic,
        visual = s.visual,
        memory_only = s.memory_only,
        "scored goals"
    );
    scores
}
