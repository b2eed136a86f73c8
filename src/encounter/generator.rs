//! Rank-relative mob generation
//!
//! A zone spawns mobs one tier below, at, or one tier above its difficulty
//! rank. Stats follow a per-axis linear curve of the resolved rank index,
//! then a single variance scalar (drawn once per mob) scales all five axes
//! uniformly so the mob reads as a stronger or weaker instance of its
//! class, never a stat-skewed one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Family, MobId, Rank, StatBlock};
use crate::encounter::zone::Zone;
use crate::sim::context::SimContext;

/// An ephemeral adversary. Born at a spawn tick, destroyed on death
/// (becoming a queue entry) or despawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: MobId,
    pub rank: Rank,
    pub family: Family,
    pub base_stats: StatBlock,
    pub hp: f64,
    pub variance_scalar: f64,
}

/// Generate one mob for the zone.
///
/// An empty family pool is a configuration error, raised immediately and
/// never retried.
pub fn generate(zone: &Zone, ctx: &mut SimContext) -> Result<Mob> {
    if zone.allowed_families.is_empty() {
        return Err(SimError::InvalidFamilyPool(zone.difficulty_rank));
    }

    let offset = ctx.rng.gen_range(-1i32..=1);
    let rank = zone.difficulty_rank.offset(offset);

    let family = zone.allowed_families[ctx.rng.gen_range(0..zone.allowed_families.len())];
    let variance = ctx
        .rng
        .gen_range(ctx.config.variance_min..=ctx.config.variance_max);

    Ok(materialize_mob(rank, family, variance, &ctx.config))
}

/// Deterministic tail of generation: rank, family, and variance already
/// resolved, stat curve and hp applied.
pub fn materialize_mob(
    rank: Rank,
    family: Family,
    variance_scalar: f64,
    config: &SimulationConfig,
) -> Mob {
    let idx = rank.index() as f64;
    let curve = config.stat_base.add(&config.stat_per_rank.scale(idx));
    let base_stats = curve.scale(variance_scalar);
    let hp = base_stats.vitality * config.hp_per_vitality;

    Mob {
        id: MobId::new(),
        rank,
        family,
        base_stats,
        hp,
        variance_scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(rank: Rank) -> Zone {
        Zone::new(rank, vec![Family::Beast, Family::Golem])
    }

    #[test]
    fn test_generated_rank_within_one_tier() {
        let mut ctx = SimContext::seeded(7);
        for rank in Rank::ALL {
            let z = zone(rank);
            for _ in 0..64 {
                let mob = generate(&z, &mut ctx).unwrap();
                let allowed = [rank.offset(-1), rank, rank.offset(1)];
                assert!(allowed.contains(&mob.rank), "{:?} out of band", mob.rank);
            }
        }
    }

    #[test]
    fn test_empty_family_pool_is_config_error() {
        let mut ctx = SimContext::seeded(7);
        let z = Zone::new(Rank::B, vec![]);
        assert!(matches!(
            generate(&z, &mut ctx),
            Err(SimError::InvalidFamilyPool(Rank::B))
        ));
    }

    #[test]
    fn test_family_drawn_from_pool() {
        let mut ctx = SimContext::seeded(11);
        let z = zone(Rank::C);
        for _ in 0..32 {
            let mob = generate(&z, &mut ctx).unwrap();
            assert!(z.allowed_families.contains(&mob.family));
        }
    }

    #[test]
    fn test_variance_scalar_within_bounds() {
        let mut ctx = SimContext::seeded(13);
        let z = zone(Rank::A);
        for _ in 0..64 {
            let mob = generate(&z, &mut ctx).unwrap();
            assert!(mob.variance_scalar >= ctx.config.variance_min);
            assert!(mob.variance_scalar <= ctx.config.variance_max);
        }
    }

    #[test]
    fn test_rank_a_strength_curve() {
        // Rank A is index 4: 100 + 4*50 = 300, scaled by 0.95 = exactly 285
        let config = SimulationConfig::default();
        let mob = materialize_mob(Rank::A, Family::Beast, 0.95, &config);
        assert_eq!(mob.base_stats.strength, 285.0);
    }

    #[test]
    fn test_variance_applies_uniformly() {
        let config = SimulationConfig::default();
        let flat = materialize_mob(Rank::B, Family::Golem, 1.0, &config);
        let scaled = materialize_mob(Rank::B, Family::Golem, 1.1, &config);
        for (a, b) in flat
            .base_stats
            .as_array()
            .iter()
            .zip(scaled.base_stats.as_array().iter())
        {
            assert!((b / a - 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hp_tracks_vitality() {
        let config = SimulationConfig::default();
        let mob = materialize_mob(Rank::D, Family::Undead, 1.0, &config);
        assert_eq!(mob.hp, mob.base_stats.vitality * config.hp_per_vitality);
    }
}
