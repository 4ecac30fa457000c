//! devcard-arena - battle simulator for developer-profile fighter cards
//!
//! Simulates a battle between two fighters from a roster snapshot, plays the
//! log back in the terminal and records the result for the leaderboard.

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use bevy::log::LogPlugin;
use bevy::prelude::App;

use devcard_arena::battle::{try_simulate_battle, GameRng};
use devcard_arena::cli::{self, BattleArgs, Command};
use devcard_arena::data::GameData;
use devcard_arena::replay::run_replay;
use devcard_arena::repository::{open_snapshot, FighterRepository};
use devcard_arena::settings::ArenaSettings;
use devcard_arena::store::{unix_now, JsonLinesResultStore, ResultStore};

/// Install the global log subscriber once, before anything can log
fn init_logging() {
    App::new().add_plugins(LogPlugin::default());
}

fn main() -> ExitCode {
    let args = cli::parse_args();
    init_logging();
    let settings = ArenaSettings::load(&args.settings);

    let outcome = match args.command {
        Command::Battle(battle) => run_battle(battle, &settings),
        Command::Leaderboard { store, limit } => {
            show_leaderboard(store.as_deref().unwrap_or(&settings.results_path), limit)
        }
        Command::Player { login, store } => {
            show_player(store.as_deref().unwrap_or(&settings.results_path), &login)
        }
        Command::Validate { game_data } => validate_game_data(&game_data),
        Command::Roster { snapshot } => {
            show_roster(snapshot.as_deref().unwrap_or(&settings.snapshot_path), &settings)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_battle(args: BattleArgs, settings: &ArenaSettings) -> Result<(), String> {
    let snapshot_path = args.snapshot.as_deref().unwrap_or(&settings.snapshot_path);
    let repository = open_snapshot(snapshot_path).map_err(|e| e.to_string())?;

    if repository.is_stale(settings.stale_after(), unix_now()) {
        println!(
            "Warning: roster snapshot {} is stale; results reflect the last sync",
            snapshot_path.display()
        );
    }

    let game_data = match &args.game_data {
        Some(path) => GameData::load(path).map_err(|e| e.to_string())?,
        None => repository.game_data().map_err(|e| e.to_string())?,
    };
    let challenger = repository
        .fighter(&args.challenger)
        .map_err(|e| e.to_string())?;
    let opponent = repository
        .fighter(&args.opponent)
        .map_err(|e| e.to_string())?;

    let seed = args.seed.or(settings.seed);
    let rng = GameRng::from_optional_seed(seed);
    println!(
        "Battle: {} ({}) vs {} ({})",
        challenger.login(),
        challenger.archetype(),
        opponent.login(),
        opponent.archetype()
    );
    if let Some(seed) = rng.seed {
        println!("  Seed: {}", seed);
    }

    let result = try_simulate_battle(&challenger, &opponent, &game_data, rng)
        .map_err(|e| e.to_string())?;

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        fs::write(output, json).map_err(|e| e.to_string())?;
        println!("Battle result written to: {}", output.display());
    }

    let sink: Option<Arc<dyn ResultStore>> = if args.no_store || !settings.persist_results {
        None
    } else {
        match JsonLinesResultStore::open(&settings.results_path) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                // Playback still runs without a store
                eprintln!("Failed to open result store: {}", e);
                None
            }
        }
    };

    let speed = args.speed.unwrap_or_else(|| settings.playback());
    let exit = run_replay(
        result,
        challenger.login(),
        game_data.mechanics.max_hp,
        speed,
        sink,
    );
    if exit.is_success() {
        Ok(())
    } else {
        Err("replay exited with an error".to_string())
    }
}

fn show_leaderboard(path: &Path, limit: usize) -> Result<(), String> {
    let store = JsonLinesResultStore::open(path).map_err(|e| e.to_string())?;
    let leaderboard = store.leaderboard().map_err(|e| e.to_string())?;

    if leaderboard.entries.is_empty() {
        println!("No battles recorded in {}", path.display());
        return Ok(());
    }

    println!(
        "{:>3}  {:<20} {:>4} {:>4} {:>6} {:>9}  {}",
        "#", "Login", "W", "L", "Win%", "Damage", "Favourite"
    );
    for (rank, entry) in leaderboard.top(limit).iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>4} {:>4} {:>5.1}% {:>9.1}  {}",
            rank + 1,
            entry.login,
            entry.total_wins,
            entry.total_losses,
            entry.win_rate * 100.0,
            entry.total_damage_dealt,
            entry.favorite_archetype
        );
    }
    Ok(())
}

fn show_player(path: &Path, login: &str) -> Result<(), String> {
    let store = JsonLinesResultStore::open(path).map_err(|e| e.to_string())?;
    let history = store.history(login).map_err(|e| e.to_string())?;

    if history.battles_played() == 0 {
        println!("No battles recorded for {} in {}", login, path.display());
        return Ok(());
    }

    println!(
        "{}: {} W / {} L ({:.1}%), {:.1} damage dealt, {} turns per battle",
        history.login,
        history.wins,
        history.losses,
        history.win_rate * 100.0,
        history.total_damage_dealt,
        history.average_turns
    );
    println!("Recent battles:");
    for battle in &history.recent_battles {
        println!(
            "  {}  {:<4} vs {:<20} {:>5.1} - {:<5.1} {:>3} turns{}",
            battle.battle_id,
            if battle.won { "WIN" } else { "LOSS" },
            battle.opponent,
            battle.final_hp,
            battle.opponent_final_hp,
            battle.turns,
            if battle.had_type_advantage {
                "  (type advantage)"
            } else {
                ""
            }
        );
    }
    Ok(())
}

fn validate_game_data(path: &Path) -> Result<(), String> {
    let game_data = GameData::load(path).map_err(|e| e.to_string())?;
    println!(
        "{} is valid: {} archetypes, {} spirit animals, max HP {}, {} turns",
        path.display(),
        game_data.archetypes.len(),
        game_data.spirit_animals.len(),
        game_data.mechanics.max_hp,
        game_data.mechanics.max_turns
    );
    Ok(())
}

fn show_roster(path: &Path, settings: &ArenaSettings) -> Result<(), String> {
    let repository = open_snapshot(path).map_err(|e| e.to_string())?;
    let fighters = repository.fighters().map_err(|e| e.to_string())?;

    for fighter in &fighters {
        let card = &fighter.card;
        println!(
            "{:<20} {:<16} {:<10} ATK {:>5.1}  DEF {:>5.1}  SPD {:>5.1}",
            fighter.login(),
            card.archetype,
            card.spirit_animal,
            card.attack,
            card.defense,
            card.speed
        );
    }
    println!("{} fighters", fighters.len());
    if repository.is_stale(settings.stale_after(), unix_now()) {
        println!("Snapshot is stale");
    }
    Ok(())
}
