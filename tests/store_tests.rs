//! Integration tests for the result store and leaderboard
//!
//! These tests verify that:
//! - Stored records are derived from the battle log
//! - The JSON-lines store appends and reads back records
//! - Corrupted lines are reported with their line number
//! - The leaderboard ranks fighters by wins, then win rate
//! - A fighter's history lists their latest battles from their own side
//! - A store that refuses writes never interrupts playback

use std::fs;
use std::sync::Arc;
use std::thread;

use devcard_arena::battle::{BattleEvent, BattleEventType, BattleLog, BattleResult, FinalHp};
use devcard_arena::data::{Fighter, Profile, ProfileCard};
use devcard_arena::replay::{replay_instantly, BattleReplay};
use devcard_arena::store::{
    record_battle, BattleStats, FighterSummary, JsonLinesResultStore, Leaderboard,
    MemoryResultStore, PlayerHistory, ResultStore, StoreError, StoredBattleResult,
    ENGINE_VERSION, RECENT_BATTLE_LIMIT,
};

fn fighter(id: u64, login: &str, archetype: &str) -> Fighter {
    Fighter {
        profile: Profile {
            id,
            login: login.to_string(),
            name: String::new(),
            avatar_url: String::new(),
        },
        card: ProfileCard {
            attack: 50.0,
            defense: 50.0,
            speed: 50.0,
            archetype: archetype.to_string(),
            spirit_animal: "Owl".to_string(),
            special_move: None,
            vibe: None,
            buff: None,
            weakness: None,
        },
    }
}

fn hit(turn: u32, attacker: &str, defender: &str, damage: f64, defender_hp: f64) -> BattleEvent {
    BattleEvent::new(
        BattleEventType::Attack,
        format!("{} attacks {}", attacker, defender),
    )
    .at_turn(turn)
    .with_attacker(attacker)
    .with_defender(defender)
    .with_hit(damage, 100.0, defender_hp, 1.0)
}

/// ada (Magician) beats linus (Ruler) by knockout with type advantage
fn knockout_result() -> BattleResult {
    let mut log = BattleLog::default();
    log.push(BattleEvent::new(
        BattleEventType::BattleStart,
        "Battle begins! ada (The Magician) vs linus (The Ruler)",
    ));
    log.push(BattleEvent::new(
        BattleEventType::TypeAdvantage,
        "The Magician has type advantage over The Ruler!",
    ));
    log.push(BattleEvent::new(
        BattleEventType::SpeedCheck,
        "ada moves first! (Speed: 70)",
    ));
    log.push(hit(1, "ada", "linus", 45.25, 54.8));
    log.push(hit(1, "linus", "ada", 12.0, 88.0));
    log.push(
        BattleEvent::new(BattleEventType::SpecialMove, "ada uses Refactor Spell!")
            .at_turn(2)
            .with_attacker("ada")
            .with_defender("linus")
            .with_hit(60.0, 88.0, 0.0, 1.5)
            .with_special_move("Refactor Spell"),
    );
    log.push(
        BattleEvent::new(BattleEventType::Knockout, "linus has been knocked out!")
            .at_turn(2)
            .with_defender("linus"),
    );
    log.push(BattleEvent::new(
        BattleEventType::BattleEnd,
        "ada wins the battle!",
    ));

    BattleResult {
        winner: fighter(1, "ada", "The Magician"),
        loser: fighter(2, "linus", "The Ruler"),
        battle_log: log,
        total_turns: 2,
        final_hp: FinalHp {
            challenger: 88.0,
            opponent: 0.0,
        },
    }
}

fn record(id: &str, timestamp: u64, winner: (&str, &str), loser: (&str, &str)) -> StoredBattleResult {
    let summary = |(login, archetype): (&str, &str), hp: f64| FighterSummary {
        login: login.to_string(),
        profile_id: login.len() as u64,
        archetype: archetype.to_string(),
        spirit_animal: "Owl".to_string(),
        final_hp: hp,
    };
    StoredBattleResult {
        battle_id: id.to_string(),
        timestamp,
        winner: summary(winner, 40.0),
        loser: summary(loser, 0.0),
        stats: BattleStats {
            total_turns: 5,
            total_damage_dealt_by_winner: 100.0,
            total_damage_dealt_by_loser: 60.0,
            winner_had_type_advantage: false,
            battle_duration_seconds: 5,
        },
        version: ENGINE_VERSION.to_string(),
    }
}

// =============================================================================
// Record Derivation Tests
// =============================================================================

#[test]
fn test_record_is_derived_from_log() {
    let stored = StoredBattleResult::from_result(&knockout_result(), "b1".to_string(), 1_700);

    assert_eq!(stored.battle_id, "b1");
    assert_eq!(stored.timestamp, 1_700);
    assert_eq!(stored.winner.login, "ada");
    assert_eq!(stored.winner.final_hp, 88.0);
    assert_eq!(stored.loser.login, "linus");
    assert_eq!(stored.loser.final_hp, 0.0);
    assert_eq!(stored.loser.profile_id, 2);

    // 45.25 + 60.0, rounded to one decimal
    assert_eq!(stored.stats.total_damage_dealt_by_winner, 105.3);
    assert_eq!(stored.stats.total_damage_dealt_by_loser, 12.0);
    assert!(stored.stats.winner_had_type_advantage);
    assert_eq!(stored.stats.total_turns, 2);
    assert_eq!(stored.stats.battle_duration_seconds, 2);
    assert_eq!(stored.version, ENGINE_VERSION);
}

#[test]
fn test_no_advantage_event_means_no_advantage() {
    let mut result = knockout_result();
    result
        .battle_log
        .entries
        .retain(|e| e.event_type != BattleEventType::TypeAdvantage);

    let stored = StoredBattleResult::from_result(&result, "b2".to_string(), 0);
    assert!(!stored.stats.winner_had_type_advantage);
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_record_battle_assigns_unique_ids() {
    let store = MemoryResultStore::new();
    let result = knockout_result();

    let first = record_battle(&store, &result).unwrap();
    let second = record_battle(&store, &result).unwrap();

    assert_ne!(first, second);
    assert_eq!(first.len(), 16);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_jsonl_store_appends_and_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history").join("battles.jsonl");
    let store = JsonLinesResultStore::open(&path).unwrap();

    assert!(store.all().unwrap().is_empty(), "no file yet means no records");

    store.save(&record("a", 10, ("ada", "The Magician"), ("linus", "The Ruler"))).unwrap();
    store.save(&record("b", 20, ("linus", "The Ruler"), ("ada", "The Magician"))).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);

    // A second handle sees the same history
    let reopened = JsonLinesResultStore::open(&path).unwrap();
    let ids: Vec<String> = reopened.all().unwrap().into_iter().map(|r| r.battle_id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_jsonl_store_reports_corrupted_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("battles.jsonl");
    let store = JsonLinesResultStore::open(&path).unwrap();
    store.save(&record("a", 10, ("ada", "The Magician"), ("linus", "The Ruler"))).unwrap();

    let mut contents = fs::read_to_string(&path).unwrap();
    contents.push_str("\n{not json\n");
    fs::write(&path, contents).unwrap();

    match store.all() {
        Err(StoreError::CorruptedRecord { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a corrupted record error, got {:?}", other),
    }
}

#[test]
fn test_concurrent_saves_keep_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonLinesResultStore::open(dir.path().join("battles.jsonl")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let id = format!("battle-{}", i);
                store
                    .save(&record(&id, i, ("ada", "The Magician"), ("linus", "The Ruler")))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.all().unwrap().len(), 8);
}

// =============================================================================
// Leaderboard Tests
// =============================================================================

#[test]
fn test_leaderboard_ranks_by_wins_then_win_rate() {
    let records = vec![
        record("1", 100, ("ada", "The Magician"), ("linus", "The Ruler")),
        record("2", 200, ("ada", "The Magician"), ("grace", "The Hero")),
        record("3", 300, ("grace", "The Hero"), ("linus", "The Ruler")),
        record("4", 400, ("linus", "The Rebel"), ("grace", "The Hero")),
        record("5", 500, ("linus", "The Rebel"), ("ada", "The Magician")),
        record("6", 600, ("linus", "The Rebel"), ("mags", "The Caregiver")),
    ];
    let leaderboard = Leaderboard::from_records(&records);

    let order: Vec<&str> = leaderboard.entries.iter().map(|e| e.login.as_str()).collect();
    // linus 3-2, ada 2-1 (0.67), grace 1-2, mags 0-1
    assert_eq!(order, vec!["linus", "ada", "grace", "mags"]);

    let linus = leaderboard.entry("linus").unwrap();
    assert_eq!((linus.total_wins, linus.total_losses), (3, 2));
    assert_eq!(linus.win_rate, 0.6);
    assert_eq!(linus.favorite_archetype, "The Rebel");
    assert_eq!(linus.last_battle_timestamp, 600);
    assert_eq!(linus.total_damage_dealt, 3.0 * 100.0 + 2.0 * 60.0);

    assert_eq!(leaderboard.top(2).len(), 2);
    assert_eq!(leaderboard.top(50).len(), 4);
}

#[test]
fn test_equal_wins_fall_back_to_win_rate() {
    let records = vec![
        record("1", 1, ("ada", "The Magician"), ("linus", "The Ruler")),
        record("2", 2, ("linus", "The Ruler"), ("bob", "The Hero")),
        record("3", 3, ("bob", "The Hero"), ("linus", "The Ruler")),
    ];
    let leaderboard = Leaderboard::from_records(&records);

    // ada 1-0 outranks bob 1-1 and linus 1-2
    let order: Vec<&str> = leaderboard.entries.iter().map(|e| e.login.as_str()).collect();
    assert_eq!(order, vec!["ada", "bob", "linus"]);
}

#[test]
fn test_store_leaderboard_uses_saved_records() {
    let store = MemoryResultStore::new();
    record_battle(&store, &knockout_result()).unwrap();

    let leaderboard = store.leaderboard().unwrap();
    assert_eq!(leaderboard.entries[0].login, "ada");
    assert_eq!(leaderboard.entries[0].total_damage_dealt, 105.3);
    assert_eq!(leaderboard.entry("linus").unwrap().win_rate, 0.0);
}

// =============================================================================
// Player History Tests
// =============================================================================

#[test]
fn test_history_reads_each_battle_from_the_players_side() {
    let mut won = record("w", 100, ("ada", "The Magician"), ("linus", "The Ruler"));
    won.stats.winner_had_type_advantage = true;
    won.stats.total_turns = 4;
    let mut lost = record("l", 200, ("grace", "The Hero"), ("ada", "The Magician"));
    lost.stats.winner_had_type_advantage = true;
    lost.loser.final_hp = 3.5;
    lost.stats.total_turns = 7;
    let unrelated = record("x", 300, ("grace", "The Hero"), ("linus", "The Ruler"));

    let history = PlayerHistory::from_records(&[won, lost, unrelated], "ADA");

    assert_eq!((history.wins, history.losses), (1, 1));
    assert_eq!(history.battles_played(), 2);
    assert_eq!(history.win_rate, 0.5);
    // 100 dealt as the winner, 60 as the loser
    assert_eq!(history.total_damage_dealt, 160.0);
    // (4 + 7) / 2 rounds to 6
    assert_eq!(history.average_turns, 6);

    let ids: Vec<&str> = history
        .recent_battles
        .iter()
        .map(|b| b.battle_id.as_str())
        .collect();
    assert_eq!(ids, vec!["l", "w"]);

    let loss = &history.recent_battles[0];
    assert_eq!(loss.opponent, "grace");
    assert!(!loss.won);
    assert_eq!((loss.final_hp, loss.opponent_final_hp), (3.5, 40.0));
    // Only the winner's advantage is recorded
    assert!(!loss.had_type_advantage);

    let win = &history.recent_battles[1];
    assert_eq!(win.opponent, "linus");
    assert!(win.won);
    assert_eq!((win.final_hp, win.opponent_final_hp), (40.0, 0.0));
    assert!(win.had_type_advantage);
    assert_eq!(win.turns, 4);
}

#[test]
fn test_history_keeps_only_the_latest_battles() {
    let records: Vec<StoredBattleResult> = (0..15u64)
        .map(|i| {
            record(
                &format!("b{}", i),
                1_000 + i,
                ("ada", "The Magician"),
                ("linus", "The Ruler"),
            )
        })
        .collect();

    let history = PlayerHistory::from_records(&records, "linus");

    assert_eq!(history.losses, 15);
    assert_eq!(history.win_rate, 0.0);
    assert_eq!(history.recent_battles.len(), RECENT_BATTLE_LIMIT);
    assert_eq!(history.recent_battles[0].battle_id, "b14");
    assert_eq!(history.recent_battles[9].battle_id, "b5");
    assert!(history
        .recent_battles
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[test]
fn test_unknown_player_has_empty_history() {
    let store = MemoryResultStore::new();
    record_battle(&store, &knockout_result()).unwrap();

    let history = store.history("grace").unwrap();
    assert_eq!(history.battles_played(), 0);
    assert_eq!(history.win_rate, 0.0);
    assert_eq!(history.average_turns, 0);
    assert!(history.recent_battles.is_empty());

    let ada = store.history("ada").unwrap();
    assert_eq!(ada.wins, 1);
    assert_eq!(ada.total_damage_dealt, 105.3);
    assert!(ada.recent_battles[0].had_type_advantage);
}

// =============================================================================
// Failing Store Tests
// =============================================================================

struct ReadOnlyStore;

impl ResultStore for ReadOnlyStore {
    fn save(&self, _record: &StoredBattleResult) -> devcard_arena::store::Result<String> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    fn all(&self) -> devcard_arena::store::Result<Vec<StoredBattleResult>> {
        Ok(Vec::new())
    }
}

#[test]
fn test_rejected_write_does_not_stop_playback() {
    assert!(record_battle(&ReadOnlyStore, &knockout_result()).is_none());

    let replay = BattleReplay::new(knockout_result(), "ada", 100.0);
    assert!(replay_instantly(replay, Some(&ReadOnlyStore)).is_none());
}
