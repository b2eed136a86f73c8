//! XP accumulation and level-up growth
//!
//! Thresholds rise monotonically with level; crossing one consumes the XP
//! and triggers a level-up. The per-axis growth delta on each level-up is
//! derived deterministically from the unit's variance seed, so two units
//! extracted from identical mobs still level apart over time.
//!
//! Everything here takes `&mut FullUnit`: the type system enforces that a
//! Compact unit is materialized before mutation.

use crate::core::config::SimulationConfig;
use crate::core::types::StatBlock;
use crate::roster::unit::FullUnit;

/// XP required to clear the given level
pub fn xp_threshold(level: u32, config: &SimulationConfig) -> u64 {
    let curve = (level as f64).powf(config.xp_curve_exponent);
    (config.base_xp as f64 * curve).round() as u64
}

/// Deterministic roll in [0, 1) from the seed, level, and stat axis.
/// Integer hash over the seed bits keeps it stable across platforms.
fn growth_roll(seed: f64, level: u32, axis: usize) -> f64 {
    let n = seed
        .to_bits()
        .wrapping_mul(374761393)
        .wrapping_add((level as u64).wrapping_mul(668265263))
        .wrapping_add((axis as u64).wrapping_mul(2246822519));
    let n = n ^ (n >> 13);
    let n = n.wrapping_mul(1274126177);
    let n = n ^ (n >> 16);
    (n as f64) / (u64::MAX as f64)
}

/// Increment level and add seed-derived deltas to `growth_stats`
pub fn on_level_up(unit: &mut FullUnit, config: &SimulationConfig) {
    unit.level += 1;

    let scale = config.growth_per_level.as_array();
    let mut delta = [0.0; 5];
    for (axis, slot) in delta.iter_mut().enumerate() {
        // Per-axis delta in [0.5x, 1.5x) of the configured scale
        let roll = growth_roll(unit.variance_seed, unit.level, axis);
        *slot = scale[axis] * (0.5 + roll);
    }
    unit.growth_stats = unit.growth_stats.add(&StatBlock::from_array(delta));
}

/// Accumulate XP, consuming thresholds as they are crossed.
/// Returns the number of levels gained.
pub fn grant_xp(unit: &mut FullUnit, amount: u64, config: &SimulationConfig) -> u32 {
    unit.xp += amount;

    let mut gained = 0;
    while unit.xp >= xp_threshold(unit.level, config) {
        unit.xp -= xp_threshold(unit.level, config);
        on_level_up(unit, config);
        gained += 1;
    }

    if gained > 0 {
        tracing::debug!(level = unit.level, gained, "unit leveled up");
    }
    gained
}
