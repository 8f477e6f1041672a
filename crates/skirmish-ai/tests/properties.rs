use glam::DVec2;
use proptest::prelude::*;

use skirmish_ai::combat_memory::CombatMemory;
use skirmish_ai::commitment::CommitmentController;
use skirmish_ai::suppression::SuppressionModel;
use skirmish_ai::thresholds::{EvolutionInputs, ThresholdEvolution};
use skirmish_ai::{step, AgentMemory, DecisionContext};
use skirmish_core::components::{AgentProfile, Sighting};
use skirmish_core::enums::Goal;
use skirmish_core::types::AgentId;

/// One tick of external stimulus for a single agent.
#[derive(Debug, Clone)]
enum Stimulus {
    Quiet,
    Sighted { source: u32, x: f64, y: f64 },
    Fired { hit: bool, x: f64, y: f64 },
    Shot { hit: bool, expected: f64 },
    Gunfire { strength: f64 },
    Killed { source: u32 },
}

fn stimulus() -> impl Strategy<Value = Stimulus> {
    prop_oneof![
        3 => Just(Stimulus::Quiet),
        2 => (0_u32..6, -80.0..80.0, -80.0..80.0)
            .prop_map(|(source, x, y)| Stimulus::Sighted { source, x, y }),
        2 => (any::<bool>(), -80.0..80.0, -80.0..80.0)
            .prop_map(|(hit, x, y)| Stimulus::Fired { hit, x, y }),
        1 => (any::<bool>(), 0.0..1.0).prop_map(|(hit, expected)| Stimulus::Shot { hit, expected }),
        1 => (-0.5..1.5).prop_map(|strength| Stimulus::Gunfire { strength }),
        1 => (0_u32..6).prop_map(|source| Stimulus::Killed { source }),
    ]
}

fn profile() -> impl Strategy<Value = AgentProfile> {
    (0.0..=1.0, 0.0..=1.0, 0.0..=1.0, 0.0..=1.0).prop_map(|(fear, composure, discipline, fc)| {
        let mut profile = AgentProfile::default();
        profile.psych.fear = fear;
        profile.psych.composure = composure;
        profile.skills.discipline = discipline;
        profile.skills.fieldcraft = fc;
        profile
    })
}

fn goal() -> impl Strategy<Value = Goal> {
    (0..Goal::COUNT).prop_map(|i| Goal::ALL[i])
}

proptest! {
    #[test]
    fn memory_stays_in_bounds(
        profile in profile(),
        stimuli in proptest::collection::vec(stimulus(), 1..300),
    ) {
        let mut memory = AgentMemory::new(&profile);
        let mut dead = [false; 6];

        for (i, stimulus) in stimuli.iter().enumerate() {
            let tick = i as u64 + 1;
            let mut sightings = Vec::new();
            match *stimulus {
                Stimulus::Quiet => {}
                Stimulus::Sighted { source, x, y } => sightings.push(Sighting {
                    source: AgentId(source),
                    position: DVec2::new(x, y),
                }),
                Stimulus::Fired { hit, x, y } => {
                    memory.receive_fire(hit, DVec2::new(x, y), DVec2::ZERO, tick)
                }
                Stimulus::Shot { hit, expected } => {
                    memory.record_shot_outcome(hit, expected, 50.0);
                }
                Stimulus::Gunfire { strength } => memory.hear_gunfire(DVec2::new(10.0, 0.0), strength),
                Stimulus::Killed { source } => dead[source as usize] = true,
            }

            let liveness = |id: AgentId| !dead.get(id.index()).copied().unwrap_or(false);
            let ctx = DecisionContext::new(AgentId(99), tick, DVec2::ZERO, profile);
            step(&mut memory, &sightings, &liveness, &ctx);

            let level = memory.suppression.level();
            prop_assert!((0.0..=1.0).contains(&level));
            prop_assert!((0.0..=1.0).contains(&memory.combat.strength()));
            prop_assert!(memory.thresholds.get().within_ranges());
            prop_assert!(memory.commitment.hysteresis_margin() <= 0.40 + 1e-12);
            prop_assert!(memory.commitment.pressure() >= 0.0);
            prop_assert!(memory.commitment.decision_debt() >= 0.0);
            prop_assert!(memory.threats.len() <= skirmish_core::constants::THREAT_MEMORY_CAPACITY);
            for fact in memory.threats.iter() {
                prop_assert!((0.0..=1.0).contains(&fact.confidence));
                if let Some(source) = fact.source {
                    prop_assert!(liveness(source), "dead source {} still remembered", source);
                }
            }
        }
    }

    #[test]
    fn decays_never_increase(start in 0.0..=1.0, pressure in 0.0..3.0, ticks in 1_usize..500) {
        let mut suppression = SuppressionModel::new();
        suppression.apply_level(start);
        let mut combat = CombatMemory::new();
        combat.record_gunfire(DVec2::ZERO, start);
        let mut commitment = CommitmentController::new(0.5);
        commitment.begin(0, false, 0.0);
        commitment.add_shatter_pressure(pressure, 0);

        for _ in 0..ticks {
            let before = (
                suppression.level(),
                combat.strength(),
                commitment.pressure(),
                commitment.decision_debt(),
            );
            suppression.decay();
            combat.decay();
            commitment.decay_shatter_pressure();
            commitment.decay_decision_debt();
            prop_assert!(suppression.level() <= before.0);
            prop_assert!(combat.strength() <= before.1);
            prop_assert!(commitment.pressure() <= before.2);
            prop_assert!(commitment.decision_debt() <= before.3);
        }
    }

    #[test]
    fn suppression_flag_never_chatters(levels in proptest::collection::vec(0.25..0.31, 1..200)) {
        let mut model = SuppressionModel::new();
        model.apply_level(0.30);
        prop_assert!(model.is_suppressed());
        for level in levels {
            model.apply_level(level);
            prop_assert!(model.is_suppressed(), "cleared at {}", level);
        }
    }

    #[test]
    fn thresholds_clamped_under_any_drift(
        goals in proptest::collection::vec(goal(), 1..120),
        fire in 0.0..50.0,
        momentum in -1.0..=1.0,
        stress in 0.0..=1.0,
    ) {
        let mut evolution = ThresholdEvolution::new();
        for (i, goal) in goals.into_iter().enumerate() {
            evolution.evolve(
                EvolutionInputs { goal, recent_fire: fire, momentum, stress, committed_at: 0 },
                i as u64 * 30,
            );
            prop_assert!(evolution.get().within_ranges());
        }
    }
}
