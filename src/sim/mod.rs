pub mod context;
pub mod tick;

pub use context::SimContext;
pub use tick::{GateSimulation, SimulationEvent};
