//! Per-battle fighter state

use crate::data::{Fighter, SpiritAnimalModifiers};

use super::damage::round_tenth;

/// The two sides of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Challenger,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Challenger, Side::Opponent];

    pub fn other(self) -> Side {
        match self {
            Side::Challenger => Side::Opponent,
            Side::Opponent => Side::Challenger,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Challenger => 0,
            Side::Opponent => 1,
        }
    }
}

/// Modified stats and HP of one fighter for the duration of one battle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterStats {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
}

impl FighterStats {
    /// Card stats scaled by spirit-animal modifiers, at full HP
    pub fn new(fighter: &Fighter, modifiers: SpiritAnimalModifiers, max_hp: f64) -> Self {
        let card = &fighter.card;
        Self {
            attack: card.attack * modifiers.attack,
            defense: card.defense * modifiers.defense,
            speed: card.speed * modifiers.speed,
            hp: max_hp,
            max_hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Remaining HP as a fraction of max HP
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }

    /// Heal up to max HP, returning the amount actually restored.
    ///
    /// HP stays on the one-decimal grid used by every hit.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.hp;
        self.hp = round_tenth((self.hp + amount).min(self.max_hp));
        self.hp - before
    }
}
