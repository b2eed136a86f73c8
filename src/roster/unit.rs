//! The persistent unit and its two storage representations
//!
//! One logical entity, two shapes: `Full` materializes every field, while
//! `Compact` keeps only what combat power needs plus the rounded
//! low-significance leftovers. The sum type makes an untagged intermediate
//! state unrepresentable; every access site matches exhaustively.

use serde::{Deserialize, Serialize};

use crate::core::types::{Rank, Role, StatBlock, Tick, UnitId, STAT_AXES};
use crate::encounter::generator::Mob;

/// Fully-materialized unit record. The only representation the Growth
/// Engine mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullUnit {
    pub id: UnitId,
    pub rank: Rank,
    pub role: Role,
    pub level: u32,
    pub xp: u64,
    /// Copied verbatim from the source mob, never re-rolled
    pub base_stats: StatBlock,
    /// Accumulated from level-ups
    pub growth_stats: StatBlock,
    /// Accumulated from time-in-combat, independent of leveling
    pub natural_growth_stats: StatBlock,
    pub extracted_at: Tick,
    pub combat_time_accumulated: f64,
    /// Differentiates leveling between units of identical origin
    pub variance_seed: f64,
    /// Diagnostics only: set when this record was rebuilt from a compact
    /// one. Never observable in gameplay-relevant output.
    #[serde(skip)]
    pub reconstructed: bool,
}

impl FullUnit {
    /// Build a fresh recruit from a defeated mob snapshot.
    ///
    /// The unit's rank is always the mob's rank; extraction never re-rolls
    /// it. Base stats move over verbatim, growth tuples start zeroed.
    pub fn extracted(mob: &Mob, extracted_at: Tick, variance_seed: f64, entropy: u64) -> Self {
        Self {
            id: UnitId::at_tick(extracted_at, entropy),
            rank: mob.rank,
            role: Role::from(mob.family),
            level: 1,
            xp: 0,
            base_stats: mob.base_stats,
            growth_stats: StatBlock::zeroed(),
            natural_growth_stats: StatBlock::zeroed(),
            extracted_at,
            combat_time_accumulated: 0.0,
            variance_seed,
            reconstructed: false,
        }
    }
}

/// Compact storage tier: identity, the three stat tuples as flat arrays,
/// level/xp/rank/role, plus the rounded low-significance fields.
/// `extracted_at` is omitted; it is reconstructed from the id's stable
/// suffix on decompression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactUnit {
    pub id: UnitId,
    pub rank: Rank,
    pub role: Role,
    pub level: u32,
    pub xp: u64,
    pub base_stats: [f64; STAT_AXES],
    pub growth_stats: [f64; STAT_AXES],
    pub natural_growth_stats: [f64; STAT_AXES],
    /// Rounded to the codec's documented precision
    pub combat_time_accumulated: f64,
    /// Rounded to the codec's documented precision
    pub variance_seed: f64,
}

/// A roster entry in one of its two representations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "representation", rename_all = "snake_case")]
pub enum Unit {
    Full(FullUnit),
    Compact(CompactUnit),
}

impl Unit {
    pub fn id(&self) -> UnitId {
        match self {
            Unit::Full(u) => u.id,
            Unit::Compact(u) => u.id,
        }
    }

    pub fn rank(&self) -> Rank {
        match self {
            Unit::Full(u) => u.rank,
            Unit::Compact(u) => u.rank,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Unit::Full(u) => u.role,
            Unit::Compact(u) => u.role,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Unit::Full(u) => u.level,
            Unit::Compact(u) => u.level,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Unit::Full(_))
    }

    /// The three stat tuples regardless of representation
    pub fn stat_blocks(&self) -> (StatBlock, StatBlock, StatBlock) {
        match self {
            Unit::Full(u) => (u.base_stats, u.growth_stats, u.natural_growth_stats),
            Unit::Compact(u) => (
                StatBlock::from_array(u.base_stats),
                StatBlock::from_array(u.growth_stats),
                StatBlock::from_array(u.natural_growth_stats),
            ),
        }
    }
}
