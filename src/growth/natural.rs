//! Natural growth from combat participation
//!
//! A simpler accretion rule than level-up growth: time spent in combat
//! drips per-axis stat gains at a configured rate, independent of XP.

use crate::core::config::SimulationConfig;
use crate::roster::unit::FullUnit;

/// Credit combat participation time and accrue the matching natural
/// growth. Full representation only, like all growth mutations.
pub fn accrue_combat_time(unit: &mut FullUnit, seconds: f64, config: &SimulationConfig) {
    if seconds <= 0.0 {
        return;
    }
    unit.combat_time_accumulated += seconds;
    unit.natural_growth_stats = unit
        .natural_growth_stats
        .add(&config.natural_growth_per_second.scale(seconds));
}
