//! Power-ranked tiering between Full and Compact representations
//!
//! A fixed-capacity priority cache where the eviction key is computed
//! combat power, not access recency: the top K units stay Full (the hot
//! set), everything else is compressed (the unbounded cold set). Membership
//! is re-evaluated on every pass, and re-running the pass on an
//! already-correct roster is a no-op.

use ordered_float::OrderedFloat;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::UnitId;
use crate::roster::codec::{compress, decompress};
use crate::roster::store::RosterStore;
use crate::roster::unit::Unit;

/// Combat power: fixed weighted sum over the unit's three stat tuples.
/// Works on either representation; every input is round-trip exact.
pub fn combat_power(unit: &Unit, config: &SimulationConfig) -> f64 {
    let (base, growth, natural) = unit.stat_blocks();
    base.add(&growth)
        .add(&natural)
        .weighted_total(&config.power_weights)
}

/// Summary of one tiering pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieringReport {
    pub evaluated: usize,
    pub promoted: usize,
    pub demoted: usize,
    pub skipped: usize,
}

/// Defensive completeness check on a record about to be re-tiered
fn check_record(unit: &Unit) -> Result<()> {
    let (base, growth, natural) = unit.stat_blocks();
    if !base.is_finite() {
        return Err(SimError::IncompleteRecord(unit.id(), "base_stats"));
    }
    if !growth.is_finite() {
        return Err(SimError::IncompleteRecord(unit.id(), "growth_stats"));
    }
    if !natural.is_finite() {
        return Err(SimError::IncompleteRecord(unit.id(), "natural_growth_stats"));
    }
    Ok(())
}

/// Recompute which units are Full vs Compact by ranked power.
///
/// Units failing the completeness check are skipped and logged for this
/// pass only; the pass itself never aborts. Idempotent: the second run on
/// an unchanged roster promotes and demotes nothing.
pub fn run_tiering_pass(store: &mut RosterStore, config: &SimulationConfig) -> TieringReport {
    let mut report = TieringReport::default();

    // Rank every healthy unit by power, id as deterministic tiebreak
    let mut ranked: Vec<(UnitId, f64)> = Vec::with_capacity(store.len());
    for unit in store.list_units() {
        match check_record(unit) {
            Ok(()) => ranked.push((unit.id(), combat_power(unit, config))),
            Err(err) => {
                tracing::warn!("Tiering pass skipping unit: {}", err);
                report.skipped += 1;
            }
        }
    }
    report.evaluated = ranked.len();

    ranked.sort_by_key(|(id, power)| (std::cmp::Reverse(OrderedFloat(*power)), *id));

    let elite: ahash::AHashSet<UnitId> = ranked
        .iter()
        .take(config.elite_capacity)
        .map(|(id, _)| *id)
        .collect();

    for unit in store.units_mut() {
        if check_record(unit).is_err() {
            continue;
        }
        let should_be_full = elite.contains(&unit.id());
        let replacement = match (&*unit, should_be_full) {
            (Unit::Compact(compact), true) => {
                report.promoted += 1;
                Some(Unit::Full(decompress(compact)))
            }
            (Unit::Full(full), false) => {
                report.demoted += 1;
                Some(Unit::Compact(compress(full)))
            }
            _ => None,
        };
        if let Some(retiered) = replacement {
            *unit = retiered;
        }
    }

    tracing::debug!(
        evaluated = report.evaluated,
        promoted = report.promoted,
        demoted = report.demoted,
        skipped = report.skipped,
        "tiering pass complete"
    );

    report
}
