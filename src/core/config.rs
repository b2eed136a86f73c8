//! Simulation configuration with documented constants
//!
//! All tuning numbers for the progression core are collected here with
//! explanations of their purpose and how they interact with each other.
//! Every value is injectable: the demo binary can override the defaults
//! from a TOML file, and tests construct targeted variants.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::core::types::{StatBlock, STAT_AXES};

/// What `enqueue` does when the extraction queue is already at capacity.
///
/// The source behavior is ambiguous here, so the policy is explicit and
/// configurable. Neither choice panics or corrupts existing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// The incoming entry is refused and handed back to the caller
    RejectNew,
    /// The oldest pending entry is dropped to make room
    EvictOldest,
}

/// Configuration for the progression simulation systems
///
/// These values are tuned for pacing, not balance; balance lives with the
/// collaborator that owns the combat numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === ENCOUNTER GENERATION ===
    /// Per-axis stat value of a rank-E mob (rank index 0)
    ///
    /// Stats grow linearly: `base + rank_index * per_rank`. With a strength
    /// base of 100 and increment of 50, a rank-A mob (index 4) rolls
    /// 300 strength before variance.
    pub stat_base: StatBlock,

    /// Per-axis stat increment per rank index
    pub stat_per_rank: StatBlock,

    /// Lower bound of the per-mob variance scalar
    ///
    /// One scalar is drawn per mob and applied uniformly across all five
    /// axes, so a given instance is uniformly stronger or weaker rather
    /// than stat-skewed. Keeps the family's class identity legible.
    pub variance_min: f64,

    /// Upper bound of the per-mob variance scalar
    pub variance_max: f64,

    /// Hit points granted per point of (post-variance) vitality
    pub hp_per_vitality: f64,

    // === EXTRACTION PROBABILITY ===
    /// Base capture rate per point of agent luck
    ///
    /// Luck is the capture-aptitude axis. At 0.002, an agent with 100 luck
    /// opens at a 20% base rate before the other multipliers.
    pub base_rate_per_luck: f64,

    /// Per-axis weights for the agent's stat-advantage total
    pub advantage_weights: [f64; STAT_AXES],

    /// Baseline weighted stat total the advantage ratio is measured against
    ///
    /// An agent whose weighted total equals this baseline gets a 1.0x
    /// advantage multiplier.
    pub advantage_baseline: f64,

    /// Rank-tier multiplier per mob rank index (E..SS)
    ///
    /// Must be monotonically non-decreasing: higher-ranked captures are
    /// inherently more valuable per attempt, never cheaper.
    pub rank_tier_multipliers: [f64; 7],

    /// Saturation scale for the resistance factor
    ///
    /// Resistance is `1 / (1 + scale * excess)` where `excess` is how far
    /// the mob's raw power exceeds the agent's (as a ratio above 1.0).
    /// Bounded to (0, 1]: an overwhelmingly stronger mob caps the
    /// achievable probability even with every other multiplier maxed.
    pub resistance_scale: f64,

    /// Retry budget for one extraction attempt
    ///
    /// Independent Bernoulli trials at the computed chance; the first
    /// success terminates. Exhausting the budget is a normal outcome.
    pub max_extraction_attempts: u32,

    // === EXTRACTION QUEUE ===
    /// Hard capacity bound C of the pending-extraction buffer
    pub queue_capacity: usize,

    /// Policy applied when `enqueue` hits the capacity bound
    pub overflow_policy: OverflowPolicy,

    /// Entries routed through the extraction engine per drain invocation
    ///
    /// Bounding per-tick work protects the rest of the simulation from a
    /// large backlog. Larger = bulk throughput, smaller = lower tick cost.
    pub drain_batch_size: usize,

    /// Ticks between drain invocations
    pub drain_interval_ticks: u64,

    // === SPAWN THROTTLE ===
    /// Ticks between spawn requests when the queue is empty
    pub nominal_spawn_interval_ticks: u64,

    /// Backlog feedback gain on the spawn interval
    ///
    /// Effective interval = `nominal * (1 + gain * backlog_fraction)`.
    /// At gain 3.0, a full queue stretches the interval 4x; as the backlog
    /// drains, spawn frequency recovers toward nominal. Keeps steady-state
    /// occupancy well below capacity without combat logic knowing about
    /// queue internals.
    pub spawn_throttle_gain: f64,

    // === ROSTER TIERING ===
    /// Elite set size K: how many units stay in Full representation
    ///
    /// Everything outside the top K by computed power is compressed. This
    /// is a fixed-capacity cache whose eviction key is power, not recency.
    pub elite_capacity: usize,

    /// Ticks between tiering passes
    pub tiering_interval_ticks: u64,

    /// Per-axis weights of the combat-power sum
    ///
    /// Power = weighted sum over base + growth + natural growth stats.
    pub power_weights: [f64; STAT_AXES],

    // === GROWTH ===
    /// XP needed to clear level 1
    ///
    /// Thresholds follow `base_xp * level^exponent`, monotonically
    /// increasing in level.
    pub base_xp: u64,

    /// Exponent of the level threshold curve
    pub xp_curve_exponent: f64,

    /// Per-axis cap of the growth delta added on one level-up
    ///
    /// The actual delta per axis is this value scaled by a deterministic
    /// roll in [0.5, 1.5) derived from the unit's variance seed, so two
    /// units of identical origin level differently.
    pub growth_per_level: StatBlock,

    /// Per-axis natural growth accrued per second of combat participation
    pub natural_growth_per_second: StatBlock,

    // === COMBAT STAND-IN (demo driver) ===
    /// Ticks a spawned mob survives before the stand-in combat loop
    /// defeats it
    pub mob_lifetime_ticks: u64,

    /// XP granted to a roster unit per mob its side defeats
    pub xp_per_defeat: u64,

    /// Combat participation seconds credited per defeat
    pub combat_seconds_per_defeat: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Encounter stat curves (strength axis matches the canonical
            // 100 + idx*50 progression)
            stat_base: StatBlock::new(100.0, 80.0, 60.0, 90.0, 40.0),
            stat_per_rank: StatBlock::new(50.0, 40.0, 30.0, 45.0, 20.0),
            variance_min: 0.85,
            variance_max: 1.15,
            hp_per_vitality: 10.0,

            // Extraction probability
            base_rate_per_luck: 0.002,
            advantage_weights: [1.0, 1.0, 1.0, 1.0, 1.0],
            advantage_baseline: 500.0,
            rank_tier_multipliers: [1.0, 1.0, 1.1, 1.2, 1.35, 1.5, 1.7],
            resistance_scale: 1.5,
            max_extraction_attempts: 3,

            // Queue
            queue_capacity: 64,
            overflow_policy: OverflowPolicy::EvictOldest,
            drain_batch_size: 8,
            drain_interval_ticks: 4,

            // Spawn throttle
            nominal_spawn_interval_ticks: 3,
            spawn_throttle_gain: 3.0,

            // Tiering
            elite_capacity: 100,
            tiering_interval_ticks: 50,
            power_weights: [1.0, 1.0, 1.0, 1.0, 0.5],

            // Growth
            base_xp: 100,
            xp_curve_exponent: 1.5,
            growth_per_level: StatBlock::new(3.0, 2.5, 2.0, 2.8, 1.0),
            natural_growth_per_second: StatBlock::new(0.02, 0.02, 0.01, 0.02, 0.005),

            // Combat stand-in
            mob_lifetime_ticks: 5,
            xp_per_defeat: 40,
            combat_seconds_per_defeat: 6.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimulationConfig = toml::from_str(&content)?;
        config.validate().map_err(SimError::Config)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.variance_min <= 0.0 || self.variance_max < self.variance_min {
            return Err(format!(
                "variance bounds [{}, {}] must be positive and ordered",
                self.variance_min, self.variance_max
            ));
        }

        if !self.stat_base.is_finite() || !self.stat_per_rank.is_finite() {
            return Err("stat curves must be finite".into());
        }

        if self.base_rate_per_luck <= 0.0 {
            return Err("base_rate_per_luck must be positive".into());
        }

        if self.advantage_baseline <= 0.0 {
            return Err("advantage_baseline must be positive".into());
        }

        if self.advantage_weights.iter().any(|w| *w < 0.0) {
            return Err("advantage_weights must be non-negative".into());
        }

        // Rank multipliers must never reward a lower tier more
        for pair in self.rank_tier_multipliers.windows(2) {
            if pair[1] < pair[0] {
                return Err(format!(
                    "rank_tier_multipliers must be non-decreasing, got {} then {}",
                    pair[0], pair[1]
                ));
            }
        }

        if self.max_extraction_attempts == 0 {
            return Err("max_extraction_attempts must be at least 1".into());
        }

        if self.queue_capacity == 0 {
            return Err("queue_capacity must be positive".into());
        }

        if self.drain_batch_size == 0 || self.drain_interval_ticks == 0 {
            return Err("drain batch size and interval must be positive".into());
        }

        if self.nominal_spawn_interval_ticks == 0 {
            return Err("nominal_spawn_interval_ticks must be positive".into());
        }

        if self.spawn_throttle_gain < 0.0 {
            return Err("spawn_throttle_gain must be non-negative".into());
        }

        if self.elite_capacity == 0 || self.tiering_interval_ticks == 0 {
            return Err("elite_capacity and tiering_interval_ticks must be positive".into());
        }

        if self.power_weights.iter().any(|w| *w < 0.0) {
            return Err("power_weights must be non-negative".into());
        }

        if self.base_xp == 0 || self.xp_curve_exponent < 1.0 {
            return Err("xp curve must be increasing (base_xp > 0, exponent >= 1)".into());
        }

        Ok(())
    }
}
