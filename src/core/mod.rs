pub mod config;
pub mod error;
pub mod types;

pub use config::{OverflowPolicy, SimulationConfig};
pub use error::{Result, SimError};
