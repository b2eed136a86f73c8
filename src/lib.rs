//! Shadow Legion - Progression Simulation Core
//!
//! Procedurally populates difficulty-scaled encounters with disposable
//! mobs, converts defeats into persistent recruits through a probabilistic
//! extraction ritual, and keeps the growing roster memory-bounded with a
//! power-ranked two-tier storage scheme.

pub mod core;
pub mod encounter;
pub mod extraction;
pub mod growth;
pub mod roster;
pub mod sim;
