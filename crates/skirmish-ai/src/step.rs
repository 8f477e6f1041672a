//! The per-tick decision pipeline for one agent.
//!
//! Order within a tick: threat update, suppression decay, the remaining
//! decays, review gating, then (on review) threshold evolution, arbitration
//! and a new commitment. Combat events for the tick (`receive_fire`,
//! `record_shot_outcome`, `hear_gunfire`) must be applied before `step`.

use glam::DVec2;

use skirmish_core::components::Sighting;
use skirmish_core::constants::*;
use skirmish_core::enums::{CommitPhase, FlankSide, Goal, OrderKind, ReviewCause};

use crate::arbiter::{select_goal_with_hysteresis, Selection};
use crate::memory::{AgentMemory, DecisionOutputs};
use crate::thresholds::EvolutionInputs;
use crate::threat_memory::{AgentLiveness, ThreatUpdate};
use crate::utility::DecisionContext;

/// What happened during one `step`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub threats: ThreatUpdate,
    /// Why a review ran this tick, if one did.
    pub review: Option<ReviewCause>,
    pub selection: Option<Selection>,
    /// Goal held before this tick, when it changed.
    pub switched_from: Option<Goal>,
}

impl StepReport {
    pub fn switched(&self) -> bool {
        self.switched_from.is_some()
    }
}

/// Advance one agent's memory by one tick and re-select its goal if a
/// review point is reached.
pub fn step(
    memory: &mut AgentMemory,
    sightings: &[Sighting],
    liveness: &impl AgentLiveness,
    ctx: &DecisionContext,
) -> StepReport {
    let tick = ctx.tick;
    let mut report = StepReport::default();

    let had_visual = memory.threats.visible_count() > 0;
    report.threats = memory.threats.update(sightings, tick, liveness);
    let has_visual = memory.threats.visible_count() > 0;
    if report.threats.new_contacts > 0 {
        memory
            .commitment
            .add_shatter_pressure(SHATTER_ON_NEW_CONTACT, tick);
    } else if had_visual && !has_visual {
        memory
            .commitment
            .add_shatter_pressure(SHATTER_ON_CONTACT_LOST, tick);
    }
    if report.threats.purged_dead > 0 {
        tracing::debug!(
            agent = %ctx.agent,
            purged = report.threats.purged_dead,
            "dropped threats whose source died"
        );
    }

    if let Some(contact) = ctx.squad.shared_contact {
        memory
            .threats
            .remember_position(contact, tick, THREAT_SQUAD_CONTACT_CONFIDENCE);
    }

    let order = ctx.squad.order.filter(|o| o.is_active(tick));
    if order != memory.last_order {
        if order.is_some() {
            memory.commitment.add_shatter_pressure(SHATTER_ON_ORDER, tick);
        }
        memory.last_order = order;
    }

    let spike = memory.suppression.decay();
    memory.combat.decay();
    memory.commitment.decay_shatter_pressure();
    memory.commitment.decay_decision_debt();
    memory.shots.decay();
    memory.peek.decay(ctx.position);
    let burst = std::mem::take(&mut memory.burst_trigger);

    report.review = if spike {
        Some(ReviewCause::SuppressionSpike)
    } else if burst {
        Some(ReviewCause::BurstMiss)
    } else if memory.commitment.phase(tick) == CommitPhase::Review {
        Some(ReviewCause::Scheduled)
    } else if memory.commitment.shatter_ready() {
        Some(ReviewCause::Shatter)
    } else {
        None
    };

    if let Some(cause) = report.review {
        let previous = memory.goal;
        let selection = review(memory, ctx, cause);
        if selection.goal != previous {
            report.switched_from = Some(previous);
        }
        report.selection = Some(selection);
    }

    memory.recent_fire = memory.recent_fire * RECENT_FIRE_RETENTION + memory.incoming_fire as f64;
    memory.incoming_fire = 0;
    report
}

fn review(memory: &mut AgentMemory, ctx: &DecisionContext, cause: ReviewCause) -> Selection {
    let tick = ctx.tick;
    let current = memory.goal;

    if memory.peek.is_pending() {
        memory.peek.resolve(memory.threats.visible_count() > 0);
    }

    let stress = memory.stress(&ctx.profile);
    if cause == ReviewCause::Scheduled {
        let inputs = EvolutionInputs {
            goal: current,
            recent_fire: memory.recent_fire + memory.incoming_fire as f64,
            momentum: memory.shots.momentum(),
            stress,
            committed_at: memory.commitment.phase_start_tick(),
        };
        memory.thresholds.evolve(inputs, tick);
    }

    let margin = memory.commitment.hysteresis_margin();
    let selection = select_goal_with_hysteresis(memory, ctx, current, margin);
    let same = selection.goal == current;
    memory.commitment.begin(tick, same, stress);

    if selection.goal == Goal::Peek && !same {
        memory.peek.begin(tick, ctx.position);
    }
    memory.goal = selection.goal;
    memory.outputs = compute_outputs(memory, ctx, selection.goal);

    if !same {
        tracing::debug!(
            agent = %ctx.agent,
            tick,
            from = ?current,
            to = ?selection.goal,
            cause = ?cause,
            "goal changed"
        );
    } else if selection.held {
        tracing::debug!(
            agent = %ctx.agent,
            tick,
            held = ?current,
            rejected = ?selection.candidate,
            margin,
            "held goal against stronger candidate"
        );
    }
    selection
}

/// Best known contact: closest visible, squad report, strongest remembered,
/// then the remembered gunfire position.
fn contact_position(memory: &AgentMemory, ctx: &DecisionContext) -> Option<DVec2> {
    memory
        .threats
        .closest_visible(ctx.position)
        .map(|f| f.position)
        .or(ctx.squad.shared_contact)
        .or_else(|| memory.threats.strongest_remembered().map(|f| f.position))
        .or_else(|| memory.combat.position().filter(|_| memory.combat.is_activated()))
}

fn compute_outputs(memory: &AgentMemory, ctx: &DecisionContext, goal: Goal) -> DecisionOutputs {
    let mut outputs = DecisionOutputs::default();
    match goal {
        Goal::Advance => {
            outputs.move_target = ctx
                .squad
                .order
                .filter(|o| o.is_active(ctx.tick))
                .filter(|o| matches!(o.kind, OrderKind::Advance | OrderKind::MoveTo))
                .and_then(|o| o.target);
        }
        Goal::MoveToContact => {
            outputs.move_target = contact_position(memory, ctx);
        }
        Goal::Flank => {
            let contact = contact_position(memory, ctx);
            outputs.move_target = contact;
            outputs.flank_side = Some(flank_side(memory, ctx, contact));
        }
        Goal::Regroup => {
            outputs.reinforcement_target = ctx.squad.rally_point;
        }
        Goal::Fallback => {
            let away = contact_position(memory, ctx)
                .and_then(|c| (ctx.position - c).try_normalize())
                .or_else(|| {
                    memory
                        .suppression
                        .bearing()
                        .map(|b| -DVec2::from_angle(b))
                });
            outputs.move_target = away.map(|dir| ctx.position + dir * FALLBACK_DISTANCE);
        }
        _ => {}
    }
    outputs
}

/// Flank away from the side fire is coming from; otherwise split by id.
fn flank_side(memory: &AgentMemory, ctx: &DecisionContext, contact: Option<DVec2>) -> FlankSide {
    let fire = memory
        .suppression
        .bearing()
        .filter(|_| memory.suppression.level() > 0.0);
    if let (Some(bearing), Some(contact)) = (fire, contact) {
        let to_contact = contact - ctx.position;
        let cross = to_contact.perp_dot(DVec2::from_angle(bearing));
        if cross > 0.0 {
            return FlankSide::Right;
        } else if cross < 0.0 {
            return FlankSide::Left;
        }
    }
    if ctx.agent.0 % 2 == 0 {
        FlankSide::Left
    } else {
        FlankSide::Right
    }
}
