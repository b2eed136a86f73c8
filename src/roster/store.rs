//! The persistent unit roster
//!
//! The only state shared across zone instances. Holds every recruited unit
//! in whichever representation the last tiering pass assigned, indexed by
//! id for O(1) lookup. Mutation is serialized by `&mut` ownership; the
//! simulation runs on a single logical thread.

use ahash::AHashMap;

use crate::core::config::SimulationConfig;
use crate::core::types::UnitId;
use crate::roster::codec::decompress;
use crate::roster::tiering::combat_power;
use crate::roster::unit::{FullUnit, Unit};

#[derive(Debug, Default)]
pub struct RosterStore {
    units: Vec<Unit>,
    index: AHashMap<UnitId, usize>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly-extracted unit. New recruits always enter Full;
    /// the next tiering pass decides whether they stay that way.
    pub fn insert_full(&mut self, unit: FullUnit) -> UnitId {
        let id = unit.id;
        self.index.insert(id, self.units.len());
        self.units.push(Unit::Full(unit));
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.index.get(&id).map(|&i| &self.units[i])
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Immutable snapshot for the presentation collaborator
    pub fn list_units(&self) -> &[Unit] {
        &self.units
    }

    /// Units currently held in Full representation
    pub fn elite_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_full()).count()
    }

    /// 1-based position of the unit in the descending power order
    pub fn power_rank_of(&self, id: UnitId, config: &SimulationConfig) -> Option<usize> {
        let target = combat_power(self.get(id)?, config);
        let stronger = self
            .units
            .iter()
            .filter(|u| u.id() != id && combat_power(u, config) > target)
            .count();
        Some(stronger + 1)
    }

    /// Materialize a unit for mutation: a Compact record is decompressed
    /// in place first. Growth only ever runs against the Full shape; the
    /// unit becomes eligible for re-compression on the next tiering pass.
    pub fn materialize(&mut self, id: UnitId) -> Option<&mut FullUnit> {
        let slot = *self.index.get(&id)?;
        let rebuilt = match &self.units[slot] {
            Unit::Compact(compact) => Some(decompress(compact)),
            Unit::Full(_) => None,
        };
        if let Some(full) = rebuilt {
            self.units[slot] = Unit::Full(full);
        }
        match &mut self.units[slot] {
            Unit::Full(full) => Some(full),
            Unit::Compact(_) => None,
        }
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }
}
