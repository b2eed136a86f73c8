//! Compression codec between the two unit representations
//!
//! Round-trip contract: `decompress(compress(u))` is exactly equal to `u`
//! on every field that feeds combat power (identity, rank, role, level, xp,
//! and all three stat tuples). Only two documented low-significance fields
//! are rounded: `combat_time_accumulated` and `variance_seed`, both to
//! [`ROUND_DECIMALS`] decimal places.

use crate::roster::unit::{CompactUnit, FullUnit};

/// Decimal places kept for the low-significance fields
pub const ROUND_DECIMALS: i32 = 3;

/// Round to the codec precision; idempotent on already-rounded values
fn round_low_significance(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DECIMALS);
    (value * factor).round() / factor
}

/// Strip reconstructable fields and round the cosmetic ones.
///
/// Idempotent on already-compact data: compressing a decompressed record
/// yields the identical compact record.
pub fn compress(full: &FullUnit) -> CompactUnit {
    CompactUnit {
        id: full.id,
        rank: full.rank,
        role: full.role,
        level: full.level,
        xp: full.xp,
        base_stats: full.base_stats.as_array(),
        growth_stats: full.growth_stats.as_array(),
        natural_growth_stats: full.natural_growth_stats.as_array(),
        combat_time_accumulated: round_low_significance(full.combat_time_accumulated),
        variance_seed: round_low_significance(full.variance_seed),
    }
}

/// Deterministically rebuild a full record from a compact one.
///
/// `extracted_at` is recomputed from the id's stable suffix. The result is
/// tagged `reconstructed` for diagnostics; the tag is skipped by serde and
/// never reaches gameplay-relevant output.
pub fn decompress(compact: &CompactUnit) -> FullUnit {
    use crate::core::types::StatBlock;

    FullUnit {
        id: compact.id,
        rank: compact.rank,
        role: compact.role,
        level: compact.level,
        xp: compact.xp,
        base_stats: StatBlock::from_array(compact.base_stats),
        growth_stats: StatBlock::from_array(compact.growth_stats),
        natural_growth_stats: StatBlock::from_array(compact.natural_growth_stats),
        extracted_at: compact.id.extraction_tick(),
        combat_time_accumulated: compact.combat_time_accumulated,
        variance_seed: compact.variance_seed,
        reconstructed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{Family, Rank, StatBlock};
    use crate::encounter::generator::materialize_mob;

    fn sample_unit() -> FullUnit {
        let config = SimulationConfig::default();
        let mob = materialize_mob(Rank::S, Family::Golem, 1.07, &config);
        let mut unit = FullUnit::extracted(&mob, 4211, 0.123456789, 99);
        unit.level = 12;
        unit.xp = 530;
        unit.growth_stats = StatBlock::new(31.5, 27.25, 20.0, 29.75, 10.5);
        unit.natural_growth_stats = StatBlock::new(1.25, 1.25, 0.625, 1.25, 0.3125);
        unit.combat_time_accumulated = 321.987654;
        unit
    }

    #[test]
    fn test_round_trip_preserves_power_fields() {
        let unit = sample_unit();
        let back = decompress(&compress(&unit));

        assert_eq!(back.id, unit.id);
        assert_eq!(back.rank, unit.rank);
        assert_eq!(back.role, unit.role);
        assert_eq!(back.level, unit.level);
        assert_eq!(back.xp, unit.xp);
        assert_eq!(back.base_stats, unit.base_stats);
        assert_eq!(back.growth_stats, unit.growth_stats);
        assert_eq!(back.natural_growth_stats, unit.natural_growth_stats);
    }

    #[test]
    fn test_extracted_at_reconstructed_from_id() {
        let unit = sample_unit();
        let back = decompress(&compress(&unit));
        assert_eq!(back.extracted_at, unit.extracted_at);
    }

    #[test]
    fn test_low_significance_fields_rounded_to_contract() {
        let unit = sample_unit();
        let compact = compress(&unit);
        assert_eq!(compact.combat_time_accumulated, 321.988);
        assert_eq!(compact.variance_seed, 0.123);
    }

    #[test]
    fn test_compress_idempotent_on_compact_data() {
        let unit = sample_unit();
        let once = compress(&unit);
        let twice = compress(&decompress(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reconstructed_tag_set_but_not_serialized() {
        let unit = sample_unit();
        let back = decompress(&compress(&unit));
        assert!(back.reconstructed);

        let json = serde_json::to_string(&back).unwrap();
        assert!(!json.contains("reconstructed"));
    }
}
