//! skirmish-run: headless driver for the squad decision simulation.
//!
//! Usage:
//!   skirmish-run run --scenario ambush.json --ticks 600
//!   skirmish-run generate --seed 7 --squads 2 --size 4 --ticks 600 --output final.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use skirmish_core::events::DecisionEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::AgentId;
use skirmish_sim::{Scenario, SimConfig, SimulationEngine};

const DEFAULT_TICKS: u64 = 600;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish-run: squad decision simulation driver\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario file\n\
         \n\
           --scenario <path>  Scenario JSON file\n\
           --ticks <N>        Ticks to simulate (default: 600)\n\
           --output <path>    Write the final snapshot JSON here (default: stdout)\n\
         \n\
         generate  Run a seeded two-team skirmish\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --squads <N>       Squads per team (default: 2)\n\
           --size <N>         Agents per squad (default: 4)\n\
           --ticks <N>        Ticks to simulate (default: 600)\n\
           --output <path>    Write the final snapshot JSON here (default: stdout)\n\
         \n\
         Set RUST_LOG=skirmish_ai=debug to trace individual reviews.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got {raw:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let path = match flag_value(args, "--scenario") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --scenario <path> is required");
            process::exit(1);
        }
    };
    let scenario = match Scenario::load(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            process::exit(1);
        }
    };
    let engine = match SimulationEngine::from_scenario(&scenario) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error building scenario: {e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Loaded {}: {} agents in {} squads (seed {})",
        path.display(),
        scenario.agents.len(),
        scenario.squads.len(),
        scenario.config.seed
    );
    simulate(engine, args);
}

// --- Generate command ---

fn cmd_generate(args: &[String]) {
    let config = SimConfig {
        seed: parse_number(args, "--seed", SimConfig::default().seed),
        ..Default::default()
    };
    let squads = parse_number(args, "--squads", 2_u32);
    let size = parse_number(args, "--size", 4_u32);

    let engine = match SimulationEngine::generate(config, squads, size) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error generating skirmish: {e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Generated seed {}: {squads} squads per team of {size}",
        config.seed
    );
    simulate(engine, args);
}

// --- Shared driver ---

fn simulate(mut engine: SimulationEngine, args: &[String]) {
    let ticks = parse_number(args, "--ticks", DEFAULT_TICKS);
    let mut timelines: BTreeMap<AgentId, Vec<String>> = BTreeMap::new();
    let mut forced = 0_u64;
    let mut held = 0_u64;
    let mut last = SimSnapshot::default();
    tracing::info!(
        ticks,
        agents = engine.registry().living_count(),
        seed = engine.config().seed,
        "starting run"
    );

    for _ in 0..ticks {
        last = engine.tick();
        for event in &last.events {
            match event {
                DecisionEvent::GoalChanged {
                    agent,
                    from,
                    to,
                    cause,
                    tick,
                } => timelines
                    .entry(*agent)
                    .or_default()
                    .push(format!("t{tick} {from:?}->{to:?} ({cause:?})")),
                DecisionEvent::GoalHeld { .. } => held += 1,
                DecisionEvent::ForcedReview { .. } => forced += 1,
            }
        }
    }

    eprintln!(
        "Simulated {ticks} ticks ({:.1}s): {forced} forced reviews, {held} held switches, {} commands rejected",
        engine.time().elapsed_secs,
        engine.rejected_commands()
    );
    for (agent, changes) in &timelines {
        eprintln!("  {agent}: {}", changes.join(", "));
    }
    for view in &last.agents {
        eprintln!(
            "  {} {:?} squad {} -> {:?} ({:?}) supp {:.2} threats {}",
            view.id,
            view.team,
            view.squad,
            view.goal,
            view.phase,
            view.suppression,
            view.threat_count
        );
    }

    let json = match serde_json::to_string_pretty(&last) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            process::exit(1);
        }
    };
    match flag_value(args, "--output") {
        Some(path) => {
            if let Err(e) = std::fs::write(path, json) {
                eprintln!("Error writing {path}: {e}");
                process::exit(1);
            }
            eprintln!("Wrote final snapshot to {path}");
        }
        None => println!("{json}"),
    }
}
