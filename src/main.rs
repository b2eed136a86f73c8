//! Shadow Legion - Entry Point
//!
//! Demo driver for the progression core: spins up one zone instance with a
//! stand-in combat loop, then either runs a fixed number of ticks or drops
//! into an interactive loop for poking at the pipeline.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use shadow_legion::core::config::SimulationConfig;
use shadow_legion::core::error::Result;
use shadow_legion::core::types::{Family, Rank, StatBlock};
use shadow_legion::encounter::zone::Zone;
use shadow_legion::extraction::AgentSnapshot;
use shadow_legion::roster::tiering::combat_power;
use shadow_legion::sim::context::SimContext;
use shadow_legion::sim::tick::{GateSimulation, SimulationEvent};

#[derive(Parser, Debug)]
#[command(name = "shadow-legion", about = "Progression simulation demo")]
struct Args {
    /// RNG seed; same seed replays the same run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML config overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many ticks non-interactively and print a summary
    #[arg(long)]
    ticks: Option<u64>,

    /// Zone difficulty rank (E, D, C, B, A, S, SS)
    #[arg(long, default_value = "B")]
    rank: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("shadow_legion=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::from_toml_path(path)?,
        None => SimulationConfig::default(),
    };

    let mut ctx = SimContext::new(args.seed, config)?;

    let rank: Rank = args
        .rank
        .parse()
        .map_err(shadow_legion::core::error::SimError::Config)?;
    let zone = Zone::new(
        rank,
        vec![Family::Beast, Family::Undead, Family::Demon, Family::Golem],
    );
    let agent = AgentSnapshot {
        stats: StatBlock::new(400.0, 350.0, 300.0, 380.0, 150.0),
        rank: rank.offset(1),
    };

    let mut sim = GateSimulation::new(zone, agent, &ctx);

    tracing::info!(seed = args.seed, rank = %rank, "Shadow Legion starting");

    if let Some(ticks) = args.ticks {
        for _ in 0..ticks {
            let events = sim.run_tick(&mut ctx)?;
            log_events(&events);
        }
        display_status(&sim, &ctx);
        return Ok(());
    }

    println!("\n=== SHADOW LEGION ===");
    println!("Progression simulation: encounters, extraction, tiered roster");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  run <n>         - Run n simulation ticks");
    println!("  status / s      - Show detailed status");
    println!("  roster          - Show the top of the power ranking");
    println!("  abandon         - Abandon the zone (discard pending entries)");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&sim, &ctx);
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "tick" | "t" => {
                let events = sim.run_tick(&mut ctx)?;
                log_events(&events);
            }
            "status" | "s" => {
                // Status already printed each loop; nothing extra
            }
            "roster" => display_roster(&sim, &ctx),
            "abandon" => {
                let discarded = sim.abandon_zone();
                println!("Discarded {} pending extraction entries", discarded.len());
            }
            "quit" | "q" => break,
            other => {
                if let Some(n) = other
                    .strip_prefix("run ")
                    .and_then(|n| n.parse::<u64>().ok())
                {
                    for _ in 0..n {
                        let events = sim.run_tick(&mut ctx)?;
                        log_events(&events);
                    }
                } else if !other.is_empty() {
                    println!("Unknown command: {}", other);
                }
            }
        }
    }

    Ok(())
}

fn log_events(events: &[SimulationEvent]) {
    for event in events {
        match event {
            SimulationEvent::UnitExtracted { rank, tick, .. } => {
                println!("[{}] extraction succeeded: rank {} recruit", tick, rank);
            }
            SimulationEvent::ExtractionExhausted { count, tick } => {
                println!("[{}] {} extraction(s) exhausted the retry budget", tick, count);
            }
            SimulationEvent::UnitLeveledUp {
                new_level, tick, ..
            } => {
                println!("[{}] lead unit reached level {}", tick, new_level);
            }
            SimulationEvent::QueueOverflow { rejected_new, tick } => {
                let what = if *rejected_new { "rejected" } else { "evicted oldest" };
                println!("[{}] queue overflow: {}", tick, what);
            }
            SimulationEvent::TieringCompleted {
                promoted,
                demoted,
                tick,
            } => {
                if *promoted + *demoted > 0 {
                    println!(
                        "[{}] tiering pass: {} promoted, {} demoted",
                        tick, promoted, demoted
                    );
                }
            }
            SimulationEvent::MobSpawned { .. } | SimulationEvent::MobDefeated { .. } => {}
        }
    }
}

fn display_status(sim: &GateSimulation, ctx: &SimContext) {
    println!(
        "tick {} | mobs {} | queue {}/{} | roster {} ({} full)",
        sim.tick(),
        sim.active_mob_count(),
        sim.queue_len(),
        ctx.config.queue_capacity,
        sim.roster().len(),
        sim.roster().elite_count(),
    );
}

fn display_roster(sim: &GateSimulation, ctx: &SimContext) {
    let mut units: Vec<_> = sim.roster().list_units().iter().collect();
    units.sort_by(|a, b| {
        combat_power(b, &ctx.config).total_cmp(&combat_power(a, &ctx.config))
    });

    println!("-- top of the legion --");
    for (pos, unit) in units.iter().take(10).enumerate() {
        println!(
            "#{:<3} rank {:<2} {:?} lv{:<3} power {:.0} [{}]",
            pos + 1,
            unit.rank().to_string(),
            unit.role(),
            unit.level(),
            combat_power(unit, &ctx.config),
            if unit.is_full() { "full" } else { "compact" },
        );
    }
}
