pub mod natural;
pub mod xp;

pub use natural::accrue_combat_time;
pub use xp::{grant_xp, on_level_up, xp_threshold};
