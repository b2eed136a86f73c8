use thiserror::Error;

use crate::core::types::{Rank, UnitId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Zone at rank {0} has an empty family pool")]
    InvalidFamilyPool(Rank),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unit {0:?} record missing required field: {1}")]
    IncompleteRecord(UnitId, &'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
