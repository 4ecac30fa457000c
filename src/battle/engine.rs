//! Turn-based battle resolution
//!
//! A battle runs synchronously to completion: stats are derived once, turn
//! order is fixed by speed, and the turn loop alternates attacks until a
//! knockout or the turn limit. The only state lives inside one
//! [`BattleEngine`] value and is dropped once the [`BattleResult`] is built.

use bevy::log::{debug, trace};
use smallvec::SmallVec;
use thiserror::Error;

use crate::data::{CardError, Fighter, GameData, Matchup, RulesetError};

use super::damage::{finalize_damage, roll_damage, round_tenth};
use super::log::{BattleEvent, BattleEventType, BattleLog};
use super::passives::{self, Passive};
use super::result::{BattleResult, FinalHp};
use super::rng::RandomSource;
use super::stats::{FighterStats, Side};

/// Errors raised when a battle's inputs are rejected up front
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("invalid ruleset: {0}")]
    InvalidRuleset(#[from] RulesetError),

    #[error("invalid fighter card: {0}")]
    InvalidCard(#[from] CardError),

    #[error("{0} cannot battle themselves")]
    SameFighter(String),
}

/// Special moves fire on every third turn, never on turn 1
pub fn is_special_turn(turn: u32) -> bool {
    turn > 1 && turn % 3 == 0
}

/// Resolves one battle between a challenger and an opponent
pub struct BattleEngine<'a, R: RandomSource> {
    game_data: &'a GameData,
    challenger: &'a Fighter,
    opponent: &'a Fighter,
    stats: [FighterStats; 2],
    log: BattleLog,
    turn: u32,
    rng: R,
}

impl<'a, R: RandomSource> BattleEngine<'a, R> {
    pub fn new(
        challenger: &'a Fighter,
        opponent: &'a Fighter,
        game_data: &'a GameData,
        rng: R,
    ) -> Self {
        let max_hp = game_data.mechanics.max_hp;
        let stats = [
            FighterStats::new(
                challenger,
                game_data.spirit_modifiers(&challenger.card.spirit_animal),
                max_hp,
            ),
            FighterStats::new(
                opponent,
                game_data.spirit_modifiers(&opponent.card.spirit_animal),
                max_hp,
            ),
        ];

        debug!(
            "Battle engine ready: {} ({}) vs {} ({})",
            challenger.login(),
            challenger.archetype(),
            opponent.login(),
            opponent.archetype()
        );

        Self {
            game_data,
            challenger,
            opponent,
            stats,
            log: BattleLog::default(),
            turn: 0,
            rng,
        }
    }

    /// Modified stats for one side as they currently stand
    pub fn stats(&self, side: Side) -> &FighterStats {
        &self.stats[side.index()]
    }

    fn fighter(&self, side: Side) -> &'a Fighter {
        match side {
            Side::Challenger => self.challenger,
            Side::Opponent => self.opponent,
        }
    }

    fn both_alive(&self) -> bool {
        self.stats.iter().all(FighterStats::is_alive)
    }

    /// Run the battle to completion
    pub fn simulate(mut self) -> BattleResult {
        let challenger = self.challenger;
        let opponent = self.opponent;

        self.log.push(BattleEvent::new(
            BattleEventType::BattleStart,
            format!(
                "Battle begins! {} ({}) vs {} ({})",
                challenger.login(),
                challenger.archetype(),
                opponent.login(),
                opponent.archetype()
            ),
        ));

        self.log_type_advantage();

        let [first, second] = self.turn_order();
        self.log.push(BattleEvent::new(
            BattleEventType::SpeedCheck,
            format!(
                "{} moves first! (Speed: {})",
                self.fighter(first).login(),
                self.stats(first).speed.round()
            ),
        ));

        let max_turns = self.game_data.mechanics.max_turns;
        while self.turn < max_turns && self.both_alive() {
            self.turn += 1;

            self.execute_attack(first);
            if self.both_alive() {
                self.execute_attack(second);
            }

            self.apply_regeneration();

            if !self.both_alive() {
                break;
            }
        }

        self.finish()
    }

    /// Log which side, if either, holds the type advantage
    fn log_type_advantage(&mut self) {
        let game_data = self.game_data;
        let challenger = self.challenger.archetype();
        let opponent = self.opponent.archetype();

        let advantage = match game_data.matchup(challenger, opponent) {
            Matchup::Strong => Some((challenger, opponent)),
            Matchup::Weak => Some((opponent, challenger)),
            Matchup::Neutral => match game_data.matchup(opponent, challenger) {
                Matchup::Strong => Some((opponent, challenger)),
                _ => None,
            },
        };

        if let Some((strong, weak)) = advantage {
            self.log.push(BattleEvent::new(
                BattleEventType::TypeAdvantage,
                format!("{} has type advantage over {}!", strong, weak),
            ));
        }
    }

    /// Higher speed acts first for the whole battle; ties are a coin flip
    fn turn_order(&mut self) -> [Side; 2] {
        let challenger_speed = self.stats(Side::Challenger).speed;
        let opponent_speed = self.stats(Side::Opponent).speed;

        let first = if challenger_speed > opponent_speed {
            Side::Challenger
        } else if opponent_speed > challenger_speed {
            Side::Opponent
        } else if self.rng.chance(0.5) {
            Side::Challenger
        } else {
            Side::Opponent
        };
        [first, first.other()]
    }

    fn execute_attack(&mut self, attacker_side: Side) {
        let defender_side = attacker_side.other();
        let attacker = self.fighter(attacker_side);
        let defender = self.fighter(defender_side);
        let attacker_passive = Passive::for_archetype(attacker.archetype());
        let defender_passive = Passive::for_archetype(defender.archetype());

        if let Some(dodge_chance) = defender_passive.map(Passive::dodge_chance) {
            if dodge_chance > 0.0 && self.rng.chance(dodge_chance) {
                trace!("Turn {}: {} dodged", self.turn, defender.login());
                self.log.push(
                    BattleEvent::new(
                        BattleEventType::PassiveTrigger,
                        format!("{} dodged the attack! (Jester Chaos)", defender.login()),
                    )
                    .at_turn(self.turn)
                    .with_attacker(attacker.login())
                    .with_defender(defender.login()),
                );
                return;
            }
        }

        let game_data = self.game_data;
        let mechanics = &game_data.mechanics;
        let special_turn = is_special_turn(self.turn);
        let special_bonus = if special_turn {
            game_data.special_move_bonus(attacker.archetype())
        } else {
            1.0
        };

        let matchup = game_data.matchup(attacker.archetype(), defender.archetype());
        let type_multiplier = mechanics.type_multiplier(matchup);

        let attacker_stats = self.stats[attacker_side.index()];
        let defender_stats = self.stats[defender_side.index()];

        let rolled = roll_damage(
            &attacker_stats,
            &defender_stats,
            mechanics,
            passives::damage_variance(attacker_passive),
            type_multiplier,
            &mut self.rng,
        );
        let damage = finalize_damage(
            rolled,
            passives::attack_bonus(attacker_passive, &attacker_stats, matchup),
            passives::damage_mitigation(defender_passive, &defender_stats),
            special_bonus,
            mechanics,
        );

        let defender_hp = round_tenth((defender_stats.hp - damage).max(0.0));
        self.stats[defender_side.index()].hp = defender_hp;

        trace!(
            "Turn {}: {} hits {} for {} ({} HP left)",
            self.turn,
            attacker.login(),
            defender.login(),
            damage,
            defender_hp
        );

        let move_name = if special_turn {
            attacker.card.special_move.as_deref().or_else(|| {
                game_data
                    .first_special_move(attacker.archetype())
                    .map(|m| m.name.as_str())
            })
        } else {
            None
        };

        let event = match move_name {
            Some(name) => BattleEvent::new(
                BattleEventType::SpecialMove,
                format!("{} uses {}!", attacker.login(), name),
            )
            .with_special_move(name),
            None => BattleEvent::new(
                BattleEventType::Attack,
                format!("{} attacks {}", attacker.login(), defender.login()),
            ),
        };
        self.log.push(
            event
                .at_turn(self.turn)
                .with_attacker(attacker.login())
                .with_defender(defender.login())
                .with_hit(damage, attacker_stats.hp, defender_hp, type_multiplier),
        );

        if defender_hp <= 0.0 {
            debug!("Turn {}: {} knocked out", self.turn, defender.login());
            self.log.push(
                BattleEvent::new(
                    BattleEventType::Knockout,
                    format!("{} has been knocked out!", defender.login()),
                )
                .at_turn(self.turn)
                .with_defender(defender.login()),
            );
        }
    }

    /// End-of-turn healing for surviving regenerating fighters
    fn apply_regeneration(&mut self) {
        let regenerating: SmallVec<[(Side, f64); 2]> = Side::BOTH
            .iter()
            .filter_map(|&side| {
                let amount = Passive::for_archetype(self.fighter(side).archetype())
                    .map_or(0.0, Passive::regeneration);
                (amount > 0.0 && self.stats(side).is_alive()).then_some((side, amount))
            })
            .collect();

        for (side, amount) in regenerating {
            let restored = self.stats[side.index()].heal(amount);
            if restored <= 0.0 {
                continue;
            }
            let login = self.fighter(side).login();
            let hp = self.stats(side).hp;
            self.log.push(
                BattleEvent::new(
                    BattleEventType::PassiveTrigger,
                    format!("{} regenerated {} HP (Caregiver)", login, round_tenth(restored)),
                )
                .at_turn(self.turn)
                .with_defender(login)
                .with_defender_hp(hp),
            );
        }
    }

    fn finish(mut self) -> BattleResult {
        let challenger_hp = round_tenth(self.stats(Side::Challenger).hp);
        let opponent_hp = round_tenth(self.stats(Side::Opponent).hp);

        // Equal HP goes to the opponent
        let (winner, loser) = if challenger_hp > opponent_hp {
            (self.challenger, self.opponent)
        } else {
            (self.opponent, self.challenger)
        };

        self.log.push(BattleEvent::new(
            BattleEventType::BattleEnd,
            format!("{} wins the battle!", winner.login()),
        ));

        debug!(
            "Battle over after {} turns: {} beat {} ({} - {})",
            self.turn,
            winner.login(),
            loser.login(),
            challenger_hp,
            opponent_hp
        );

        BattleResult {
            winner: winner.clone(),
            loser: loser.clone(),
            battle_log: self.log,
            total_turns: self.turn,
            final_hp: FinalHp {
                challenger: challenger_hp,
                opponent: opponent_hp,
            },
        }
    }
}

/// Simulate a battle with an already-validated ruleset
pub fn simulate_battle<R: RandomSource>(
    challenger: &Fighter,
    opponent: &Fighter,
    game_data: &GameData,
    rng: R,
) -> BattleResult {
    BattleEngine::new(challenger, opponent, game_data, rng).simulate()
}

/// Validate the ruleset and both cards, then simulate
pub fn try_simulate_battle<R: RandomSource>(
    challenger: &Fighter,
    opponent: &Fighter,
    game_data: &GameData,
    rng: R,
) -> Result<BattleResult, BattleError> {
    game_data.validate()?;
    challenger.validate_card()?;
    opponent.validate_card()?;
    if challenger.login().eq_ignore_ascii_case(opponent.login()) {
        return Err(BattleError::SameFighter(challenger.login().to_string()));
    }
    Ok(simulate_battle(challenger, opponent, game_data, rng))
}
