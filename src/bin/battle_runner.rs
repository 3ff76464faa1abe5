//! Headless Battle Runner
//!
//! Runs AI vs AI battles and outputs JSON or text summaries. Battles in a
//! batch run in parallel, each with its own state and seeded RNG.

use chain_legends::battle::ai::{BattleAi, Difficulty, OpponentPolicy};
use chain_legends::battle::{
    narrate, BattleEventLog, BattleState, CombatantSlot, Resolver, Settlement, Side,
};
use chain_legends::combat::{Element, Fighter};
use chain_legends::core::{config, set_config, BattleConfig, CombatantId, FighterId, FixedClock, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

/// Headless Battle Runner - AI vs AI battles for balance testing
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run AI vs AI Chain Legends battles and report the results")]
struct Args {
    /// Element of side A's fighter
    #[arg(long, default_value = "fire")]
    element_a: Element,

    /// Element of side B's fighter
    #[arg(long, default_value = "water")]
    element_b: Element,

    /// Level of side A's fighter
    #[arg(long, default_value_t = 1)]
    level_a: u32,

    /// Level of side B's fighter
    #[arg(long, default_value_t = 1)]
    level_b: u32,

    /// Policy difficulty for side A
    #[arg(long, default_value = "medium")]
    difficulty_a: Difficulty,

    /// Policy difficulty for side B
    #[arg(long, default_value = "medium")]
    difficulty_b: Difficulty,

    /// Number of battles to run
    #[arg(long, default_value_t = 1)]
    battles: u64,

    /// Random seed for deterministic runs (battle i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config overriding resolver and AI tunables
    #[arg(long)]
    config: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the narrated log of every battle to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Per-battle result
#[derive(Serialize)]
struct BattleSummary {
    seed: u64,
    winner: Side,
    turns: u32,
    health_a: u32,
    health_b: u32,
    battle_data_hash: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    element_a: Element,
    element_b: Element,
    difficulty_a: Difficulty,
    difficulty_b: Difficulty,
    wins_a: usize,
    wins_b: usize,
    average_turns: f64,
    battles: Vec<BattleSummary>,
}

fn fighter_slot(side: Side, element: Element, level: u32) -> CombatantSlot {
    let tag = match side {
        Side::A => "a",
        Side::B => "b",
    };
    CombatantSlot::new(
        Fighter::generate(FighterId::new(tag), format!("{element} {tag}"), element, level),
        CombatantId::ai(),
    )
}

fn run_battle(args: &Args, config: &BattleConfig, seed: u64) -> Result<(BattleSummary, BattleState)> {
    // Fixed clock keeps transcripts identical for identical seeds
    let resolver = Resolver::with_clock(config.resolver.clone(), FixedClock(0));
    let policy_a = OpponentPolicy::with_config(args.difficulty_a, config.ai.clone());
    let policy_b = OpponentPolicy::with_config(args.difficulty_b, config.ai.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut events = BattleEventLog::new();

    let start = resolver.start_battle(
        fighter_slot(Side::A, args.element_a, args.level_a),
        fighter_slot(Side::B, args.element_b, args.level_b),
    )?;
    let done = resolver.play_out(&start, &policy_a, &policy_b, &mut rng, &mut events)?;
    let settlement = Settlement::from_state(&done)?;

    tracing::debug!(
        seed,
        events = events.len(),
        a = %policy_a.name(),
        b = %policy_b.name(),
        "Battle finished"
    );

    let summary = BattleSummary {
        seed,
        winner: settlement.winner,
        turns: settlement.turns,
        health_a: done.side_a.current_health,
        health_b: done.side_b.current_health,
        battle_data_hash: settlement.battle_data_hash.to_hex(),
    };
    Ok((summary, done))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "chain_legends=debug"
    } else {
        "chain_legends=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.config {
        if set_config(BattleConfig::load(path)?).is_err() {
            tracing::warn!("Battle config already initialized, ignoring {}", path);
        }
    }
    let config = config();

    // Determine seed
    let seed = args.seed.unwrap_or_else(rand::random);

    let results: Vec<(BattleSummary, BattleState)> = (0..args.battles.max(1))
        .into_par_iter()
        .map(|i| run_battle(&args, config, seed.wrapping_add(i)))
        .collect::<Result<_>>()?;

    if args.verbose {
        for (summary, state) in &results {
            eprintln!("=== Battle seed {} ===", summary.seed);
            for line in narrate(state) {
                eprintln!("  {line}");
            }
            eprintln!();
        }
    }

    let battles: Vec<BattleSummary> = results.into_iter().map(|(summary, _)| summary).collect();
    let wins_a = battles.iter().filter(|b| b.winner == Side::A).count();
    let total_turns: u64 = battles.iter().map(|b| b.turns as u64).sum();
    let report = RunReport {
        element_a: args.element_a,
        element_b: args.element_b,
        difficulty_a: args.difficulty_a,
        difficulty_b: args.difficulty_b,
        wins_a,
        wins_b: battles.len() - wins_a,
        average_turns: total_turns as f64 / battles.len() as f64,
        battles,
    };

    match args.format.as_str() {
        "text" => {
            println!("Battle Results");
            println!("==============");
            println!(
                "{} ({}) vs {} ({})",
                report.element_a, report.difficulty_a, report.element_b, report.difficulty_b
            );
            println!("Side A wins: {}", report.wins_a);
            println!("Side B wins: {}", report.wins_b);
            println!("Average turns: {:.1}", report.average_turns);
            for battle in &report.battles {
                println!(
                    "  seed {:>20}  winner {:?}  turns {:>2}  hp {:>3}/{:>3}  {}",
                    battle.seed,
                    battle.winner,
                    battle.turns,
                    battle.health_a,
                    battle.health_b,
                    battle.battle_data_hash
                );
            }
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
