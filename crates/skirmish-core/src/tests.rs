use glam::DVec2;

use crate::commands::SimCommand;
use crate::components::*;
use crate::constants::*;
use crate::enums::*;
use crate::events::DecisionEvent;
use crate::state::SimSnapshot;
use crate::types::{bearing_between, secs_to_ticks, AgentId, SimTime};

/// Verify the goal enum round-trips through serde_json.
#[test]
fn test_goal_serde() {
    for goal in Goal::ALL {
        let json = serde_json::to_string(&goal).unwrap();
        let back: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(goal, back);
    }
}

#[test]
fn test_goal_all_matches_index() {
    for (i, goal) in Goal::ALL.iter().enumerate() {
        assert_eq!(goal.index(), i, "{goal:?} out of scoring order");
    }
    assert_eq!(Goal::default(), Goal::Advance);
}

#[test]
fn test_goal_families_disjoint() {
    for goal in Goal::ALL {
        let families = [goal.is_fighting(), goal.is_retreating(), goal.is_holding()];
        assert!(
            families.iter().filter(|f| **f).count() <= 1,
            "{goal:?} belongs to more than one family"
        );
    }
}

#[test]
fn test_order_kind_goal_mapping() {
    assert_eq!(OrderKind::MoveTo.goal(), Goal::Advance);
    assert_eq!(OrderKind::Hold.goal(), Goal::HoldPosition);
    assert_eq!(OrderKind::Fallback.goal(), Goal::Fallback);
    assert_eq!(OrderKind::Overwatch.goal(), Goal::Overwatch);
}

#[test]
fn test_review_cause_forced() {
    assert!(!ReviewCause::Scheduled.is_forced());
    assert!(ReviewCause::Shatter.is_forced());
    assert!(ReviewCause::SuppressionSpike.is_forced());
    assert!(ReviewCause::BurstMiss.is_forced());
}

#[test]
fn test_order_expiry() {
    let order = OfficerOrder {
        kind: OrderKind::Hold,
        priority: 1.0,
        strength: 1.0,
        target: None,
        expires_at_tick: 100,
    };
    assert!(order.is_active(99));
    assert!(!order.is_active(100));
}

#[test]
fn test_team_opposition() {
    assert!(Team::Blue.opposes(Team::Red));
    assert!(!Team::Red.opposes(Team::Red));
}

#[test]
fn test_bearing_between() {
    let east = bearing_between(DVec2::ZERO, DVec2::new(10.0, 0.0)).unwrap();
    assert!(east.abs() < 1e-12);
    let north = bearing_between(DVec2::ZERO, DVec2::new(0.0, 5.0)).unwrap();
    assert!((north - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(bearing_between(DVec2::ONE, DVec2::ONE).is_none());
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, TICK_RATE as u64);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    assert_eq!(secs_to_ticks(3.0), 180);
}

#[test]
fn test_threshold_defaults_inside_ranges() {
    let pairs = [
        (ENGAGE_SHOT_QUALITY_DEFAULT, ENGAGE_SHOT_QUALITY_RANGE),
        (LONG_RANGE_SHOT_QUALITY_DEFAULT, LONG_RANGE_SHOT_QUALITY_RANGE),
        (PUSH_ON_MISS_MOMENTUM_DEFAULT, PUSH_ON_MISS_MOMENTUM_RANGE),
        (HOLD_ON_HIT_MOMENTUM_DEFAULT, HOLD_ON_HIT_MOMENTUM_RANGE),
        (COVER_FEAR_DEFAULT, COVER_FEAR_RANGE),
    ];
    for (default, (lo, hi)) in pairs {
        assert!(lo < hi);
        assert!((lo..=hi).contains(&default));
    }
    assert!(SUPPRESSION_CLEAR_THRESHOLD < SUPPRESSION_ENTER_THRESHOLD);
    assert!(HYSTERESIS_BASE < HYSTERESIS_MAX);
}

#[test]
fn test_partial_profile_deserializes_with_defaults() {
    let profile: AgentProfile =
        serde_json::from_str(r#"{"skills":{"discipline":0.9}}"#).unwrap();
    assert_eq!(profile.skills.discipline, 0.9);
    assert_eq!(profile.skills.marksmanship, 0.5);
    assert_eq!(profile.psych.morale, 0.5);

    let tactical: TacticalInputs = serde_json::from_str("{}").unwrap();
    assert!(tactical.path_available);
}

#[test]
fn test_command_serde_tagged() {
    let cmd = SimCommand::ShotFired {
        shooter: AgentId(1),
        target: AgentId(2),
        hit: true,
        expected_chance: 0.4,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains(r#""type":"ShotFired""#));
    let back: SimCommand = serde_json::from_str(&json).unwrap();
    match back {
        SimCommand::ShotFired { shooter, hit, .. } => {
            assert_eq!(shooter, AgentId(1));
            assert!(hit);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_snapshot_serde() {
    let snapshot = SimSnapshot {
        time: SimTime {
            tick: 12,
            elapsed_secs: 0.2,
        },
        agents: Vec::new(),
        events: vec![DecisionEvent::GoalChanged {
            agent: AgentId(3),
            from: Goal::Advance,
            to: Goal::Engage,
            cause: ReviewCause::Shatter,
            tick: 12,
        }],
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: SimSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.time.tick, 12);
    assert_eq!(back.events, snapshot.events);
    assert_eq!(back.events[0].agent(), AgentId(3));
}
