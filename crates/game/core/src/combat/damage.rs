//! Damage calculation.

use crate::env::RngOracle;

/// Critical check: a d100 roll at or below `crit_chance` is a critical hit.
pub fn is_critical(rng: &(impl RngOracle + ?Sized), seed: u64, crit_chance: u8) -> bool {
    crit_chance > 0 && rng.roll_d100(seed) <= u32::from(crit_chance)
}

/// Calculate the damage of one hit.
///
/// # Formula
///
/// ```text
/// raw = critical ? ceil(offense * multiplier / 100) : offense
/// damage = max(raw - defense, 0)
/// if critical: damage = max(damage, 1)
/// ```
///
/// The multiplier is applied before mitigation, so a critical hit always
/// draws blood.
pub fn calculate_damage(offense: u32, defense: u32, critical: bool, crit_multiplier: u16) -> u32 {
    let raw = if critical {
        (u64::from(offense) * u64::from(crit_multiplier)).div_ceil(100) as u32
    } else {
        offense
    };
    let damage = raw.saturating_sub(defense);
    if critical { damage.max(1) } else { damage }
}
