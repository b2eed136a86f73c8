pub mod generator;
pub mod spawner;
pub mod zone;

pub use generator::{generate, materialize_mob, Mob};
pub use spawner::SpawnScheduler;
pub use zone::Zone;
