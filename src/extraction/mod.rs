//! Probabilistic conversion of defeated mobs into persistent recruits

pub mod attempt;
pub mod chance;
pub mod queue;

use serde::{Deserialize, Serialize};

use crate::core::types::{Rank, StatBlock, Tick};
use crate::encounter::generator::Mob;

pub use attempt::{attempt, Outcome};
pub use chance::extraction_chance;
pub use queue::{DrainReport, EnqueueResult, ExtractionQueue};

/// The capturing agent's stats and rank, frozen at the moment of the
/// mob's death
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub stats: StatBlock,
    pub rank: Rank,
}

/// Immutable snapshot of one defeat, consumed exactly once: either into a
/// unit or discarded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionQueueEntry {
    pub mob: Mob,
    pub agent: AgentSnapshot,
    pub defeated_at: Tick,
}
