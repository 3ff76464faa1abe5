//! Chain Legends - Entry Point
//!
//! Interactive duel: you pick each round's action for side A, the opponent
//! policy plays side B, and the resolver settles the round.

use chain_legends::battle::ai::{battle_quip, BattleAi, Difficulty, OpponentPolicy, QuipKind};
use chain_legends::battle::{
    experience_gained, narrate, should_level_up, BattleEventLog, BattleState, CombatantSlot,
    Resolver, Settlement, Side,
};
use chain_legends::combat::{Action, Element, Fighter};
use chain_legends::core::{config, set_config, BattleConfig, CombatantId, FighterId, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "chain-legends")]
#[command(about = "Fight a Chain Legends duel against the opponent AI")]
struct Args {
    /// Your fighter's element
    #[arg(long, default_value = "fire")]
    element: Element,

    /// Opponent's element
    #[arg(long, default_value = "earth")]
    opponent: Element,

    /// Level of both fighters
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Opponent difficulty: easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Random seed for a reproducible duel
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config overriding resolver and AI tunables
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("chain_legends=info")
        .init();

    let args = Args::parse();
    if let Some(path) = &args.config {
        if set_config(BattleConfig::load(path)?).is_err() {
            tracing::warn!("Battle config already initialized, ignoring {}", path);
        }
    }
    let config = config();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(seed, "Chain Legends starting...");

    let resolver = Resolver::new(config.resolver.clone());
    let opponent = OpponentPolicy::new(args.difficulty);
    let mut events = BattleEventLog::new();

    let player = Fighter::generate(FighterId::new("player"), "Challenger", args.element, args.level);
    let rival = Fighter::generate(
        FighterId::new("rival"),
        format!("{} Warden", capitalize(args.opponent.name())),
        args.opponent,
        args.level,
    );
    let mut state = resolver.start_battle(
        CombatantSlot::new(player, CombatantId::new("player")),
        CombatantSlot::new(rival, CombatantId::ai()),
    )?;

    println!("\n=== CHAIN LEGENDS ===");
    println!("{} ({}) vs {}", describe(&state, Side::A), args.element, opponent.name());
    println!("{} ({})", describe(&state, Side::B), args.opponent);
    println!();
    println!("Actions: attack (a), defend (d), special (s), item (i), quit (q)");
    println!();

    let mut shown = 0;
    while state.is_active() {
        print_status(&state);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!("Leaving the arena.");
            return Ok(());
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            println!("You forfeit the duel.");
            return Ok(());
        }

        let action_a = match input.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let action_b = opponent.choose(&state, Side::B, &mut rng);

        state = resolver.advance_round(&state, action_a, action_b, &mut rng, &mut events)?;

        let lines = narrate(&state);
        for line in &lines[shown..] {
            println!("  {line}");
        }
        shown = lines.len();

        if let Some(record) = state.actions.iter().rev().find(|r| r.side == Side::B) {
            let kind = QuipKind::for_record(record);
            println!(
                "  \"{}\"",
                battle_quip(record.action, &state.slot(Side::B).fighter, kind, &mut rng)
            );
        }
        println!();
    }

    print_status(&state);
    let settlement = Settlement::from_state(&state)?;
    let winner = &state.slot(settlement.winner).fighter;
    let loser = &state.slot(settlement.winner.opponent()).fighter;
    println!("=== {} wins after {} rounds ===", winner.name, settlement.turns);

    if settlement.winner == Side::A {
        let gained = experience_gained(winner, loser, &mut rng);
        let total = winner.experience + gained;
        println!("+{gained} XP ({total} total)");
        if should_level_up(winner, total) {
            println!("Level up! {} reaches level {}", winner.name, Fighter::level_for_experience(total));
        }
    }
    println!("Battle hash: {}", settlement.battle_data_hash);
    tracing::debug!(events = events.len(), "Duel finished");

    Ok(())
}

fn describe(state: &BattleState, side: Side) -> String {
    let fighter = &state.slot(side).fighter;
    format!(
        "{} Lv{} [ATK {} DEF {} SPD {}]",
        fighter.name, fighter.level, fighter.attack, fighter.defense, fighter.speed
    )
}

fn print_status(state: &BattleState) {
    for side in Side::BOTH {
        let slot = state.slot(side);
        println!(
            "  {:<16} {:>3}/{:<3} {}",
            slot.fighter.name,
            slot.current_health,
            slot.fighter.max_health,
            health_bar(slot.health_fraction())
        );
    }
    println!("  Round {}", state.turn_number + 1);
}

fn health_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
