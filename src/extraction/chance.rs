//! Extraction probability model
//!
//! The capture chance is a product of five factors: a luck-proportional
//! base rate, a weighted stat-advantage ratio, a rank-tier multiplier, a
//! halving penalty per rank the mob sits above the agent, and a saturating
//! resistance factor keyed on raw power. Holding the mob fixed, the result
//! is monotonically non-decreasing in every agent stat.

use crate::core::config::SimulationConfig;
use crate::encounter::generator::Mob;
use crate::extraction::AgentSnapshot;

/// Floor keeping the returned probability strictly positive
const MIN_CHANCE: f64 = 1e-4;

/// Penalty base applied per rank the mob exceeds the agent
const RANK_PENALTY_BASE: f64 = 0.5;

/// Capture probability in (0, 1]
pub fn extraction_chance(agent: &AgentSnapshot, mob: &Mob, config: &SimulationConfig) -> f64 {
    // (1) base rate from the capture-aptitude axis
    let base_rate = agent.stats.luck * config.base_rate_per_luck;

    // (2) weighted stat advantage over the baseline
    let advantage =
        agent.stats.weighted_total(&config.advantage_weights) / config.advantage_baseline;

    // (3) tier value of the mob's absolute rank
    let tier = config.rank_tier_multipliers[mob.rank.index()];

    // (4) halves per rank-index the mob exceeds the agent; no penalty the
    // other way
    let rank_penalty = RANK_PENALTY_BASE.powi(mob.rank.tiers_above(agent.rank) as i32);

    // (5) saturating resistance from raw power excess, bounded to (0, 1]
    let agent_power = agent.stats.total().max(f64::EPSILON);
    let excess = (mob.base_stats.total() / agent_power - 1.0).max(0.0);
    let resistance = 1.0 / (1.0 + config.resistance_scale * excess);

    (base_rate * advantage * tier * rank_penalty * resistance).clamp(MIN_CHANCE, 1.0)
}
