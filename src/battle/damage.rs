//! Damage calculation

use crate::data::BattleMechanics;

use super::rng::RandomSource;
use super::stats::FighterStats;

/// Defense is floored here before dividing, so a zero-defense card cannot
/// produce infinite damage.
pub const MIN_EFFECTIVE_DEFENSE: f64 = 1.0;

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Attack over (floored) defense, scaled by the base damage multiplier
pub fn base_damage(
    attacker: &FighterStats,
    defender: &FighterStats,
    mechanics: &BattleMechanics,
) -> f64 {
    let defense = defender.defense.max(MIN_EFFECTIVE_DEFENSE);
    attacker.attack / defense * mechanics.base_damage_multiplier
}

/// Roll damage for one hit, before passives and special-move bonuses.
///
/// Draws exactly one roll from `rng` for the variance factor.
pub fn roll_damage<R: RandomSource>(
    attacker: &FighterStats,
    defender: &FighterStats,
    mechanics: &BattleMechanics,
    variance: f64,
    type_multiplier: f64,
    rng: &mut R,
) -> f64 {
    let base = base_damage(attacker, defender, mechanics);
    let random_factor = rng.range(1.0 - variance, 1.0 + variance);
    let damage = round_tenth(base * random_factor * type_multiplier);
    damage.max(mechanics.minimum_damage)
}

/// Apply passive and special-move modifiers to rolled damage.
///
/// The damage floor is re-applied so modifiers never push a hit below it.
pub fn finalize_damage(
    rolled: f64,
    attack_bonus: f64,
    mitigation: f64,
    special_bonus: f64,
    mechanics: &BattleMechanics,
) -> f64 {
    let mitigation = if mitigation > 0.0 { mitigation } else { 1.0 };
    round_tenth(rolled * attack_bonus * special_bonus / mitigation).max(mechanics.minimum_damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::FixedRolls;
    use crate::data::{TypeMultipliers, VarianceRange};

    fn mechanics() -> BattleMechanics {
        BattleMechanics {
            max_hp: 100.0,
            max_turns: 50,
            base_damage_multiplier: 20.0,
            random_variance: VarianceRange { min: 0.85, max: 1.15 },
            type_multipliers: TypeMultipliers {
                strong: 1.5,
                weak: 0.75,
                neutral: 1.0,
            },
            minimum_damage: 1.0,
        }
    }

    fn stats(attack: f64, defense: f64) -> FighterStats {
        FighterStats {
            attack,
            defense,
            speed: 50.0,
            hp: 100.0,
            max_hp: 100.0,
        }
    }

    #[test]
    fn test_base_damage_ratio() {
        let base = base_damage(&stats(80.0, 50.0), &stats(50.0, 40.0), &mechanics());
        assert_eq!(base, 40.0);
    }

    #[test]
    fn test_zero_defense_is_floored() {
        let base = base_damage(&stats(80.0, 50.0), &stats(50.0, 0.0), &mechanics());
        assert!(base.is_finite());
        assert_eq!(base, 80.0 / MIN_EFFECTIVE_DEFENSE * 20.0);
    }

    #[test]
    fn test_roll_spans_variance_band() {
        let m = mechanics();
        let attacker = stats(50.0, 50.0);
        let defender = stats(50.0, 50.0);

        // Roll 0.0 lands on the low edge of the band: 20 * 0.85
        let low = roll_damage(&attacker, &defender, &m, 0.15, 1.0, &mut FixedRolls::constant(0.0));
        assert_eq!(low, 17.0);

        // Roll 0.5 lands in the middle, then the strong multiplier applies
        let mid = roll_damage(&attacker, &defender, &m, 0.15, 1.5, &mut FixedRolls::constant(0.5));
        assert_eq!(mid, 30.0);

        let rebel_low =
            roll_damage(&attacker, &defender, &m, 0.25, 1.0, &mut FixedRolls::constant(0.0));
        assert_eq!(rebel_low, 15.0);
    }

    #[test]
    fn test_roll_respects_minimum_damage() {
        let m = mechanics();
        let damage = roll_damage(
            &stats(1.0, 50.0),
            &stats(50.0, 1000.0),
            &m,
            0.15,
            0.75,
            &mut FixedRolls::constant(0.0),
        );
        assert_eq!(damage, m.minimum_damage);
    }

    #[test]
    fn test_finalize_applies_modifiers_and_floor() {
        let m = mechanics();
        assert_eq!(finalize_damage(20.0, 1.1, 1.0, 1.5, &m), 33.0);
        assert_eq!(finalize_damage(21.0, 1.0, 1.05, 1.0, &m), 20.0);
        assert_eq!(finalize_damage(1.0, 1.0, 1.05, 1.0, &m), 1.0);
    }
}
