//! Zone configuration supplied by the encounter collaborator

use serde::{Deserialize, Serialize};

use crate::core::types::{Family, Rank};

/// Read-only encounter context: difficulty tier plus the family pool mobs
/// are drawn from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub difficulty_rank: Rank,
    pub allowed_families: Vec<Family>,
}

impl Zone {
    pub fn new(difficulty_rank: Rank, allowed_families: Vec<Family>) -> Self {
        Self {
            difficulty_rank,
            allowed_families,
        }
    }
}
