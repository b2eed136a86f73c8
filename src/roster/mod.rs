pub mod codec;
pub mod store;
pub mod tiering;
pub mod unit;

pub use codec::{compress, decompress, ROUND_DECIMALS};
pub use store::RosterStore;
pub use tiering::{combat_power, run_tiering_pass, TieringReport};
pub use unit::{CompactUnit, FullUnit, Unit};
