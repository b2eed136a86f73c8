//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulation tick counter (simulation time unit)
pub type Tick = u64;

/// Ordered power/difficulty tier shared by zones, mobs, and units.
///
/// All rank arithmetic is by index with clamping to the domain bounds,
/// so `E.offset(-1) == E` and `Ss.offset(1) == Ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    E = 0,
    D = 1,
    C = 2,
    B = 3,
    A = 4,
    S = 5,
    Ss = 6,
}

impl Rank {
    pub const ALL: [Rank; 7] = [
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::Ss,
    ];

    /// Zero-based index into the rank ladder
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rank at the given index, clamped into the valid domain
    pub fn from_index(index: usize) -> Rank {
        let clamped = index.min(Self::ALL.len() - 1);
        Self::ALL[clamped]
    }

    /// Rank arithmetic by signed offset, clamped at both ends
    pub fn offset(self, delta: i32) -> Rank {
        let idx = (self.index() as i32 + delta).max(0) as usize;
        Self::from_index(idx)
    }

    /// Number of tiers this rank sits above `other` (zero if not above)
    pub fn tiers_above(self, other: Rank) -> u32 {
        (self.index() as u32).saturating_sub(other.index() as u32)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::Ss => "SS",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "E" => Ok(Rank::E),
            "D" => Ok(Rank::D),
            "C" => Ok(Rank::C),
            "B" => Ok(Rank::B),
            "A" => Ok(Rank::A),
            "S" => Ok(Rank::S),
            "SS" => Ok(Rank::Ss),
            other => Err(format!("Unknown rank: {}", other)),
        }
    }
}

/// Mob family enumeration; drives role assignment on extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Beast,
    Undead,
    Insectoid,
    Demon,
    Golem,
    Humanoid,
    Elemental,
}

impl Family {
    pub const ALL: [Family; 7] = [
        Family::Beast,
        Family::Undead,
        Family::Insectoid,
        Family::Demon,
        Family::Golem,
        Family::Humanoid,
        Family::Elemental,
    ];
}

/// Battlefield role of a recruited unit, derived from its source family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Striker,
    Tank,
    Caster,
    Scout,
    Support,
}

impl From<Family> for Role {
    fn from(family: Family) -> Self {
        match family {
            Family::Beast => Role::Striker,
            Family::Undead => Role::Support,
            Family::Insectoid => Role::Scout,
            Family::Demon => Role::Caster,
            Family::Golem => Role::Tank,
            Family::Humanoid => Role::Striker,
            Family::Elemental => Role::Caster,
        }
    }
}

/// Number of stat axes in a [`StatBlock`]
pub const STAT_AXES: usize = 5;

/// The five-axis stat tuple shared by mobs, agents, and units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub vitality: f64,
    pub luck: f64,
}

impl StatBlock {
    pub fn new(strength: f64, agility: f64, intelligence: f64, vitality: f64, luck: f64) -> Self {
        Self {
            strength,
            agility,
            intelligence,
            vitality,
            luck,
        }
    }

    pub fn zeroed() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn as_array(&self) -> [f64; STAT_AXES] {
        [
            self.strength,
            self.agility,
            self.intelligence,
            self.vitality,
            self.luck,
        ]
    }

    pub fn from_array(values: [f64; STAT_AXES]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4])
    }

    /// Unweighted sum of all five axes
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Dot product against a per-axis weight vector
    pub fn weighted_total(&self, weights: &[f64; STAT_AXES]) -> f64 {
        self.as_array()
            .iter()
            .zip(weights.iter())
            .map(|(v, w)| v * w)
            .sum()
    }

    /// Uniform scale across all five axes (single-scalar variance)
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_array(self.as_array().map(|v| v * factor))
    }

    pub fn add(&self, other: &StatBlock) -> Self {
        let a = self.as_array();
        let b = other.as_array();
        Self::from_array([
            a[0] + b[0],
            a[1] + b[1],
            a[2] + b[2],
            a[3] + b[3],
            a[4] + b[4],
        ])
    }

    /// True when every axis holds a finite value
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Unique identifier for recruited units.
///
/// The trailing 64 bits of the UUID carry the extraction tick, which is how
/// a compact record reconstructs `extracted_at` without storing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    /// Mint an id whose stable suffix encodes the extraction tick
    pub fn at_tick(tick: Tick, entropy: u64) -> Self {
        Self(Uuid::from_u64_pair(entropy, tick))
    }

    /// Extraction tick recovered from the id's stable suffix
    pub fn extraction_tick(&self) -> Tick {
        self.0.as_u64_pair().1
    }
}

/// Unique identifier for ephemeral mobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MobId(pub Uuid);

impl MobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MobId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::E < Rank::D);
        assert!(Rank::A < Rank::S);
        assert!(Rank::S < Rank::Ss);
    }

    #[test]
    fn test_rank_offset_clamps_at_bounds() {
        assert_eq!(Rank::E.offset(-1), Rank::E);
        assert_eq!(Rank::E.offset(-5), Rank::E);
        assert_eq!(Rank::Ss.offset(1), Rank::Ss);
        assert_eq!(Rank::B.offset(1), Rank::A);
        assert_eq!(Rank::B.offset(-1), Rank::C);
    }

    #[test]
    fn test_rank_from_index_clamps() {
        assert_eq!(Rank::from_index(0), Rank::E);
        assert_eq!(Rank::from_index(4), Rank::A);
        assert_eq!(Rank::from_index(99), Rank::Ss);
    }

    #[test]
    fn test_rank_tiers_above() {
        assert_eq!(Rank::S.tiers_above(Rank::B), 2);
        assert_eq!(Rank::B.tiers_above(Rank::S), 0);
        assert_eq!(Rank::A.tiers_above(Rank::A), 0);
    }

    #[test]
    fn test_rank_parse_roundtrip() {
        for rank in Rank::ALL {
            let parsed: Rank = rank.to_string().parse().unwrap();
            assert_eq!(parsed, rank);
        }
    }

    #[test]
    fn test_stat_block_scale_is_uniform() {
        let stats = StatBlock::new(100.0, 80.0, 60.0, 90.0, 40.0);
        let scaled = stats.scale(1.1);
        for (orig, new) in stats.as_array().iter().zip(scaled.as_array().iter()) {
            assert!((new / orig - 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stat_block_weighted_total() {
        let stats = StatBlock::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let weights = [1.0, 0.0, 1.0, 0.0, 2.0];
        assert_eq!(stats.weighted_total(&weights), 1.0 + 3.0 + 10.0);
    }

    #[test]
    fn test_unit_id_suffix_carries_tick() {
        let id = UnitId::at_tick(7731, 0xDEAD_BEEF);
        assert_eq!(id.extraction_tick(), 7731);
    }

    #[test]
    fn test_role_from_family_is_total() {
        for family in Family::ALL {
            let _ = Role::from(family);
        }
    }
}
