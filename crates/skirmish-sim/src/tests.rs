//! Tests for the simulation engine, squad aggregation, command handling and
//! the decision system's event stream.

use glam::DVec2;

use skirmish_core::commands::SimCommand;
use skirmish_core::components::SocialSignals;
use skirmish_core::constants::{DEFAULT_HEARING_RANGE, DEFAULT_SIGHT_RANGE};
use skirmish_core::enums::*;
use skirmish_core::events::DecisionEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::AgentId;

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::SimError;
use crate::scenario::{AgentSpec, Scenario};

fn agent(id: u32, team: Team, squad: u32, x: f64, y: f64) -> AgentSpec {
    AgentSpec {
        id: Some(AgentId(id)),
        team,
        squad,
        position: DVec2::new(x, y),
        hit_chance: 0.4,
        ..Default::default()
    }
}

fn engine_with(agents: &[AgentSpec]) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for spec in agents {
        engine.spawn_agent(spec).unwrap();
    }
    engine
}

fn social(engine: &SimulationEngine, id: AgentId) -> SocialSignals {
    let entity = engine.registry().living_entity(id).unwrap();
    *engine.world().get::<&SocialSignals>(entity).unwrap()
}

fn shot(shooter: u32, target: u32, hit: bool) -> SimCommand {
    SimCommand::ShotFired {
        shooter: AgentId(shooter),
        target: AgentId(target),
        hit,
        expected_chance: 0.4,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::generate(config, 2, 4).unwrap();
    let mut engine_b = SimulationEngine::generate(config, 2, 4).unwrap();

    for i in 0..300_u32 {
        if i % 20 == 0 {
            let command = shot(i % 8, 8 + i % 8, i % 40 == 0);
            engine_a.queue_command(command.clone());
            engine_b.queue_command(command);
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::generate(
        SimConfig {
            seed: 111,
            ..Default::default()
        },
        2,
        4,
    )
    .unwrap();
    let mut engine_b = SimulationEngine::generate(
        SimConfig {
            seed: 222,
            ..Default::default()
        },
        2,
        4,
    )
    .unwrap();

    // Generated positions differ, so the very first snapshot differs.
    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce different skirmishes");
}

// ---- Engine basics ----

#[test]
fn test_time_advances() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..60 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 60);
    assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_generate_layout() {
    let mut engine = SimulationEngine::generate(SimConfig::default(), 2, 3).unwrap();
    assert_eq!(engine.registry().len(), 12);

    let snap = engine.tick();
    assert_eq!(snap.agents.len(), 12);
    let ids: Vec<u32> = snap.agents.iter().map(|a| a.id.0).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>(), "Snapshot agents sorted by id");

    for view in &snap.agents {
        let expected = if view.id.0 < 6 { Team::Blue } else { Team::Red };
        assert_eq!(view.team, expected);
        if view.team == Team::Blue {
            assert!(view.position.x < 0.0);
        } else {
            assert!(view.position.x > 0.0);
        }
    }
}

#[test]
fn test_first_tick_commits_every_agent() {
    let mut engine = SimulationEngine::generate(SimConfig::default(), 1, 4).unwrap();
    let snap = engine.tick();
    for view in &snap.agents {
        assert_eq!(view.phase, CommitPhase::Commit, "{} not committed", view.id);
    }
    assert!(
        !snap
            .events
            .iter()
            .any(|e| matches!(e, DecisionEvent::ForcedReview { .. })),
        "A quiet first tick only runs scheduled reviews"
    );
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut engine = SimulationEngine::generate(SimConfig::default(), 1, 3).unwrap();
    engine.queue_command(shot(0, 3, true));
    let snap = engine.tick();

    let json = serde_json::to_string(&snap).unwrap();
    let back: SimSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.agents.len(), snap.agents.len());
    assert_eq!(back.events, snap.events);
    assert_eq!(back.time.tick, snap.time.tick);
}

// ---- Registry ----

#[test]
fn test_duplicate_spawn_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.spawn_agent(&agent(0, Team::Blue, 0, 0.0, 0.0)).unwrap();
    let err = engine
        .spawn_agent(&agent(0, Team::Red, 1, 10.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, SimError::DuplicateAgent(AgentId(0))));
    assert_eq!(engine.registry().len(), 1);
}

#[test]
fn test_spawn_without_id_takes_next_free() {
    let mut engine = engine_with(&[agent(4, Team::Blue, 0, 0.0, 0.0)]);
    let id = engine
        .spawn_agent(&AgentSpec {
            team: Team::Red,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(id, AgentId(5));
}

#[test]
fn test_kill_despawns_and_keeps_record() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    engine.tick();

    engine.queue_command(SimCommand::KillAgent { agent: AgentId(1) });
    let snap = engine.tick();

    assert!(snap.agent(AgentId(1)).is_none(), "Dead agent should be despawned");
    assert!(!engine.registry().is_alive(AgentId(1)));
    assert!(engine.registry().get(AgentId(1)).is_some(), "Record kept for liveness");
    assert_eq!(engine.registry().living_count(), 1);
    assert!(engine.memory(AgentId(1)).is_err());
}

// ---- Threat memory through the world ----

#[test]
fn test_sighted_enemy_remembered() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
        agent(2, Team::Red, 1, DEFAULT_SIGHT_RANGE + 50.0, 0.0),
    ]);
    let snap = engine.tick();

    let blue = snap.agent(AgentId(0)).unwrap();
    assert_eq!(blue.threat_count, 1, "Only the enemy in sight range is known");
    assert_eq!(blue.visible_threats, 1);
    let memory = engine.memory(AgentId(0)).unwrap();
    assert!(memory.threats.fact_for(AgentId(1)).is_some());
    assert!(memory.threats.fact_for(AgentId(2)).is_none());
}

#[test]
fn test_dead_source_purged_from_memory() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    let snap = engine.tick();
    assert_eq!(snap.agent(AgentId(0)).unwrap().threat_count, 1);

    engine.queue_command(SimCommand::KillAgent { agent: AgentId(1) });
    let snap = engine.tick();
    assert_eq!(
        snap.agent(AgentId(0)).unwrap().threat_count,
        0,
        "Threat whose source died must be purged"
    );
}

#[test]
fn test_shared_contact_reaches_squad() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Blue, 0, 5.0, 0.0),
    ]);
    engine.queue_command(SimCommand::SetSharedContact {
        squad: 0,
        position: Some(DVec2::new(200.0, 0.0)),
    });
    let snap = engine.tick();

    for view in &snap.agents {
        assert_eq!(view.threat_count, 1);
        assert_eq!(view.visible_threats, 0, "Reported contacts are not sightings");
    }
}

// ---- Combat events ----

#[test]
fn test_hit_suppresses_target_and_alerts_earshot() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
        agent(2, Team::Blue, 0, 5.0, 0.0),
    ]);
    engine.queue_commands([shot(1, 0, true), shot(1, 0, true)]);
    let snap = engine.tick();

    let target = snap.agent(AgentId(0)).unwrap();
    assert!(target.suppressed);
    assert!((target.suppression - (0.5 - 1.0 / 240.0)).abs() < 1e-9);

    // Ally 25 m from the shooter hears it at 1 - 25/150.
    let ally = snap.agent(AgentId(2)).unwrap();
    let expected = 1.0 - 25.0 / DEFAULT_HEARING_RANGE - 1.0 / 3600.0;
    assert!((ally.combat_memory - expected).abs() < 1e-9);

    let shooter = snap.agent(AgentId(1)).unwrap();
    assert_eq!(shooter.combat_memory, 0.0, "Shooter does not hear itself");
}

#[test]
fn test_suppression_spike_emits_forced_review() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    engine.tick();

    engine.queue_commands([shot(1, 0, true), shot(1, 0, true)]);
    let snap = engine.tick();
    assert!(
        snap.events.iter().any(|e| matches!(
            e,
            DecisionEvent::ForcedReview {
                agent: AgentId(0),
                cause: ReviewCause::SuppressionSpike,
                tick: 1,
            }
        )),
        "Expected a suppression-spike review, got {:?}",
        snap.events
    );
}

#[test]
fn test_burst_miss_emits_forced_review() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    engine.tick();

    engine.queue_commands([shot(0, 1, false), shot(0, 1, false), shot(0, 1, false)]);
    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DecisionEvent::ForcedReview {
            agent: AgentId(0),
            cause: ReviewCause::BurstMiss,
            ..
        }
    )));
}

#[test]
fn test_events_drained_each_tick() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    engine.tick();
    engine.queue_commands([shot(1, 0, true), shot(1, 0, true)]);
    let spiked = engine.tick();
    assert!(!spiked.events.is_empty());

    let quiet = engine.tick();
    assert!(!quiet.events.iter().any(|e| matches!(
        e,
        DecisionEvent::ForcedReview {
            cause: ReviewCause::SuppressionSpike,
            ..
        }
    )));
    assert!(quiet.events.iter().all(|e| match e {
        DecisionEvent::GoalChanged { tick, .. }
        | DecisionEvent::GoalHeld { tick, .. }
        | DecisionEvent::ForcedReview { tick, .. } => *tick == 2,
    }));
}

// ---- Commands ----

#[test]
fn test_rejected_commands_counted() {
    let mut engine = engine_with(&[agent(0, Team::Blue, 0, 0.0, 0.0)]);
    engine.queue_commands([
        SimCommand::SetPosition {
            agent: AgentId(77),
            position: DVec2::ZERO,
        },
        SimCommand::SetSquadIntent {
            squad: 99,
            intent: SquadIntent::Hold,
        },
        SimCommand::SetSquadIntent {
            squad: 0,
            intent: SquadIntent::Hold,
        },
    ]);
    engine.tick();
    assert_eq!(engine.rejected_commands(), 2);
}

#[test]
fn test_commands_for_dead_agent_rejected() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
    ]);
    engine.queue_command(SimCommand::KillAgent { agent: AgentId(1) });
    engine.tick();

    engine.queue_commands([
        SimCommand::KillAgent { agent: AgentId(1) },
        SimCommand::SetHitChance {
            agent: AgentId(1),
            hit_chance: 0.9,
        },
        shot(1, 0, true),
    ]);
    engine.tick();
    // A repeated kill is a no-op, the other two name a dead agent.
    assert_eq!(engine.rejected_commands(), 2);
    assert_eq!(engine.memory(AgentId(0)).unwrap().suppression.level(), 0.0);
}

#[test]
fn test_set_position_moves_agent() {
    let mut engine = engine_with(&[agent(0, Team::Blue, 0, 0.0, 0.0)]);
    engine.queue_command(SimCommand::SetPosition {
        agent: AgentId(0),
        position: DVec2::new(12.0, -3.0),
    });
    let snap = engine.tick();
    assert_eq!(snap.agent(AgentId(0)).unwrap().position, DVec2::new(12.0, -3.0));
}

// ---- Squad aggregation ----

#[test]
fn test_isolation_accumulates() {
    let mut engine = engine_with(&[agent(0, Team::Blue, 0, 0.0, 0.0)]);
    for _ in 0..3 {
        engine.tick();
    }
    let signals = social(&engine, AgentId(0));
    assert_eq!(signals.visible_allies, 0);
    assert_eq!(signals.isolation_ticks, 3);
}

#[test]
fn test_ally_support_resets_isolation() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Blue, 0, 100.0, 0.0),
    ]);
    engine.tick();
    engine.tick();
    assert_eq!(social(&engine, AgentId(0)).isolation_ticks, 2);

    engine.queue_command(SimCommand::SetPosition {
        agent: AgentId(1),
        position: DVec2::new(10.0, 0.0),
    });
    engine.tick();
    let signals = social(&engine, AgentId(0));
    assert_eq!(signals.visible_allies, 1);
    assert_eq!(signals.isolation_ticks, 0);
}

#[test]
fn test_outnumbered_and_crowding() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Blue, 0, 2.0, 0.0),
        agent(2, Team::Red, 1, 40.0, 0.0),
        agent(3, Team::Red, 1, 40.0, 5.0),
        agent(4, Team::Red, 1, 40.0, -5.0),
        agent(5, Team::Red, 1, 45.0, 0.0),
    ]);
    engine.tick();
    let signals = social(&engine, AgentId(0));
    assert_eq!(signals.visible_allies, 1);
    assert!((signals.outnumbered - 2.0).abs() < 1e-12, "4 enemies / (1 ally + 1)");
    assert!((signals.crowding - 0.25).abs() < 1e-12, "1 ally inside 3 m");
}

#[test]
fn test_squad_fear_average() {
    let mut fearful = agent(0, Team::Blue, 0, 0.0, 0.0);
    fearful.profile.psych.fear = 0.8;
    let mut calm = agent(1, Team::Blue, 0, 5.0, 0.0);
    calm.profile.psych.fear = 0.2;
    let mut engine = engine_with(&[fearful, calm]);
    engine.tick();

    let signals = social(&engine, AgentId(1));
    assert!((signals.squad_avg_fear - 0.5).abs() < 1e-12);
    assert_eq!(signals.squad_fear_delta, 0.0, "No delta on the first sample");
}

// ---- Orders and goals ----

#[test]
fn test_withdraw_order_turns_squad_back() {
    let mut engine = engine_with(&[
        agent(0, Team::Blue, 0, 0.0, 0.0),
        agent(1, Team::Red, 1, 30.0, 0.0),
        agent(2, Team::Red, 1, 30.0, 5.0),
        agent(3, Team::Red, 1, 30.0, -5.0),
    ]);
    engine.queue_commands([
        SimCommand::SetSquadIntent {
            squad: 0,
            intent: SquadIntent::Withdraw,
        },
        SimCommand::IssueOrder {
            squad: 0,
            order: skirmish_core::components::OfficerOrder {
                kind: OrderKind::Fallback,
                priority: 1.0,
                strength: 1.0,
                target: None,
                expires_at_tick: 600,
            },
        },
    ]);
    let snap = engine.tick();

    let blue = snap.agent(AgentId(0)).unwrap();
    assert_eq!(blue.goal, Goal::Fallback);
    let target = blue.outputs.move_target.unwrap();
    assert!(target.x < 0.0, "Fallback should move away from the enemy");
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DecisionEvent::GoalChanged {
            agent: AgentId(0),
            from: Goal::Advance,
            to: Goal::Fallback,
            ..
        }
    )));
}

// ---- Scenarios ----

#[test]
fn test_partial_scenario_uses_defaults() {
    let json = r#"{
        "config": { "seed": 7 },
        "squads": [ { "id": 1, "intent": "Hold" } ],
        "agents": [ { "team": "Red", "squad": 1, "position": [40.0, 0.0] } ]
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    assert_eq!(scenario.config.seed, 7);
    assert_eq!(scenario.config.sight_range, DEFAULT_SIGHT_RANGE);
    assert_eq!(scenario.squads[0].intent, SquadIntent::Hold);
    assert_eq!(scenario.agents[0].id, None);
    assert_eq!(scenario.agents[0].position, DVec2::new(40.0, 0.0));

    let mut engine = SimulationEngine::from_scenario(&scenario).unwrap();
    assert!(engine.registry().is_alive(AgentId(0)));
    let snap = engine.tick();
    assert_eq!(snap.agents[0].team, Team::Red);
}

#[test]
fn test_malformed_scenario_is_an_error() {
    let err = Scenario::from_json("{ \"agents\": 3 }").unwrap_err();
    assert!(matches!(err, SimError::Scenario(_)));
}

#[test]
fn test_generated_scenario_reloads() {
    let mut rng = <rand_chacha::ChaCha8Rng as rand::SeedableRng>::seed_from_u64(9);
    let scenario =
        crate::world_setup::generate_skirmish(&mut rng, SimConfig::default(), 1, 2);
    let json = scenario.to_json().unwrap();
    let back = Scenario::from_json(&json).unwrap();
    assert_eq!(back.agents.len(), 4);
    assert_eq!(back.squads.len(), 2);

    let mut a = SimulationEngine::from_scenario(&scenario).unwrap();
    let mut b = SimulationEngine::from_scenario(&back).unwrap();
    assert_eq!(
        serde_json::to_string(&a.tick()).unwrap(),
        serde_json::to_string(&b.tick()).unwrap()
    );
}
