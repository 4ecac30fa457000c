//! Archetype passives
//!
//! Passives are keyed by archetype name through a lookup table and evaluated
//! uniformly on every attack. Archetypes without an entry have no passive.

use crate::data::Matchup;

use super::stats::FighterStats;

/// Damage variance for ordinary attackers (±15%)
pub const BASE_VARIANCE: f64 = 0.15;
/// Damage variance for The Rebel (±25%)
pub const REBEL_VARIANCE: f64 = 0.25;
/// Chance for The Jester to dodge an incoming attack
pub const JESTER_DODGE_CHANCE: f64 = 0.10;
/// HP restored to The Caregiver after each full turn
pub const CAREGIVER_REGEN: f64 = 2.0;

const MAGICIAN_ADVANTAGE_BONUS: f64 = 1.10;
const HERO_MITIGATION: f64 = 1.05;
const HERO_HP_THRESHOLD: f64 = 0.5;
const RULER_BONUS: f64 = 1.10;
const RULER_HP_THRESHOLD: f64 = 0.75;
const LOVER_MAX_BONUS: f64 = 0.30;

/// Passive effect attached to an archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passive {
    /// The Magician: +10% damage when attacking with type advantage
    ArcaneFocus,
    /// The Hero: incoming damage divided by 1.05 below 50% HP
    LastStand,
    /// The Ruler: +10% damage while above 75% HP
    Command,
    /// The Lover: up to +30% damage as HP runs out
    Heartache,
    /// The Jester: 10% chance to dodge an attack outright
    ChaosDodge,
    /// The Rebel: wider damage variance
    Wildcard,
    /// The Caregiver: regenerates HP after every full turn
    Regeneration,
}

const PASSIVE_TABLE: &[(&str, Passive)] = &[
    ("The Magician", Passive::ArcaneFocus),
    ("The Hero", Passive::LastStand),
    ("The Ruler", Passive::Command),
    ("The Lover", Passive::Heartache),
    ("The Jester", Passive::ChaosDodge),
    ("The Rebel", Passive::Wildcard),
    ("The Caregiver", Passive::Regeneration),
];

impl Passive {
    pub fn for_archetype(archetype: &str) -> Option<Passive> {
        PASSIVE_TABLE
            .iter()
            .find(|(name, _)| *name == archetype)
            .map(|(_, passive)| *passive)
    }

    /// Attacker-side damage multiplier, from the attacker's current HP
    pub fn attack_bonus(self, attacker: &FighterStats, matchup: Matchup) -> f64 {
        match self {
            Passive::ArcaneFocus if matchup == Matchup::Strong => MAGICIAN_ADVANTAGE_BONUS,
            Passive::Command if attacker.hp > attacker.max_hp * RULER_HP_THRESHOLD => RULER_BONUS,
            Passive::Heartache => 1.0 + (1.0 - attacker.hp_fraction()) * LOVER_MAX_BONUS,
            _ => 1.0,
        }
    }

    /// Defender-side divisor applied to incoming damage
    pub fn damage_mitigation(self, defender: &FighterStats) -> f64 {
        match self {
            Passive::LastStand if defender.hp < defender.max_hp * HERO_HP_THRESHOLD => {
                HERO_MITIGATION
            }
            _ => 1.0,
        }
    }

    pub fn dodge_chance(self) -> f64 {
        match self {
            Passive::ChaosDodge => JESTER_DODGE_CHANCE,
            _ => 0.0,
        }
    }

    pub fn damage_variance(self) -> f64 {
        match self {
            Passive::Wildcard => REBEL_VARIANCE,
            _ => BASE_VARIANCE,
        }
    }

    /// HP restored at the end of each full turn
    pub fn regeneration(self) -> f64 {
        match self {
            Passive::Regeneration => CAREGIVER_REGEN,
            _ => 0.0,
        }
    }
}

/// Attacker bonus for an optional passive
pub fn attack_bonus(passive: Option<Passive>, attacker: &FighterStats, matchup: Matchup) -> f64 {
    passive.map_or(1.0, |p| p.attack_bonus(attacker, matchup))
}

/// Defender mitigation for an optional passive
pub fn damage_mitigation(passive: Option<Passive>, defender: &FighterStats) -> f64 {
    passive.map_or(1.0, |p| p.damage_mitigation(defender))
}

pub fn damage_variance(passive: Option<Passive>) -> f64 {
    passive.map_or(BASE_VARIANCE, Passive::damage_variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hp: f64) -> FighterStats {
        FighterStats {
            attack: 50.0,
            defense: 50.0,
            speed: 50.0,
            hp,
            max_hp: 100.0,
        }
    }

    #[test]
    fn test_lookup_table_matches_exact_archetype_names() {
        for (name, passive) in PASSIVE_TABLE {
            assert_eq!(Passive::for_archetype(name), Some(*passive));
        }
        assert_eq!(Passive::for_archetype("The Explorer"), None);
        assert_eq!(Passive::for_archetype("the magician"), None);
    }

    #[test]
    fn test_magician_needs_type_advantage() {
        let full = stats(100.0);
        assert_eq!(Passive::ArcaneFocus.attack_bonus(&full, Matchup::Strong), 1.10);
        assert_eq!(Passive::ArcaneFocus.attack_bonus(&full, Matchup::Neutral), 1.0);
        assert_eq!(Passive::ArcaneFocus.attack_bonus(&full, Matchup::Weak), 1.0);
    }

    #[test]
    fn test_ruler_bonus_only_above_three_quarters() {
        assert_eq!(Passive::Command.attack_bonus(&stats(76.0), Matchup::Neutral), 1.10);
        assert_eq!(Passive::Command.attack_bonus(&stats(75.0), Matchup::Neutral), 1.0);
    }

    #[test]
    fn test_lover_scales_with_missing_hp() {
        assert_eq!(Passive::Heartache.attack_bonus(&stats(100.0), Matchup::Neutral), 1.0);
        let half = Passive::Heartache.attack_bonus(&stats(50.0), Matchup::Neutral);
        assert!((half - 1.15).abs() < 1e-9);
        let empty = Passive::Heartache.attack_bonus(&stats(0.0), Matchup::Neutral);
        assert!((empty - 1.30).abs() < 1e-9);
    }

    #[test]
    fn test_hero_mitigates_below_half() {
        assert_eq!(Passive::LastStand.damage_mitigation(&stats(49.9)), 1.05);
        assert_eq!(Passive::LastStand.damage_mitigation(&stats(50.0)), 1.0);
        // Hero passive never boosts the Hero's own attacks
        assert_eq!(Passive::LastStand.attack_bonus(&stats(10.0), Matchup::Strong), 1.0);
    }

    #[test]
    fn test_optional_passive_helpers_default_to_neutral() {
        let s = stats(30.0);
        assert_eq!(attack_bonus(None, &s, Matchup::Strong), 1.0);
        assert_eq!(damage_mitigation(None, &s), 1.0);
        assert_eq!(damage_variance(None), BASE_VARIANCE);
        assert_eq!(damage_variance(Some(Passive::Wildcard)), REBEL_VARIANCE);
        assert_eq!(Passive::ChaosDodge.dodge_chance(), JESTER_DODGE_CHANCE);
        assert_eq!(Passive::Regeneration.regeneration(), CAREGIVER_REGEN);
        assert_eq!(Passive::Command.regeneration(), 0.0);
    }
}
