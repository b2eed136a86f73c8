//! Backlog-throttled spawn scheduling
//!
//! The spawn tick slows down as the extraction queue fills and recovers as
//! it drains: a negative-feedback admission control loop that keeps the
//! queue's steady-state occupancy well below capacity without the combat
//! loop knowing anything about queue internals.

use crate::core::config::SimulationConfig;
use crate::core::types::Tick;

/// Decides on each tick whether the generator should be invoked
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    nominal_interval_ticks: u64,
    throttle_gain: f64,
    next_spawn_at: Tick,
}

impl SpawnScheduler {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            nominal_interval_ticks: config.nominal_spawn_interval_ticks,
            throttle_gain: config.spawn_throttle_gain,
            next_spawn_at: 0,
        }
    }

    /// Spawn interval stretched by current backlog (fraction in [0, 1])
    pub fn effective_interval(&self, backlog_fraction: f64) -> u64 {
        let clamped = backlog_fraction.clamp(0.0, 1.0);
        let stretched =
            self.nominal_interval_ticks as f64 * (1.0 + self.throttle_gain * clamped);
        (stretched.round() as u64).max(1)
    }

    /// True when a spawn is due this tick; schedules the next one using the
    /// backlog observed now, so throttling reacts within one interval.
    pub fn should_spawn(&mut self, tick: Tick, backlog_fraction: f64) -> bool {
        if tick < self.next_spawn_at {
            return false;
        }
        self.next_spawn_at = tick + self.effective_interval(backlog_fraction);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> SpawnScheduler {
        SpawnScheduler::new(&SimulationConfig::default())
    }

    #[test]
    fn test_nominal_cadence_when_empty() {
        let s = scheduler();
        assert_eq!(s.effective_interval(0.0), s.nominal_interval_ticks);
    }

    #[test]
    fn test_full_backlog_stretches_interval() {
        let s = scheduler();
        let full = s.effective_interval(1.0);
        assert!(full > s.nominal_interval_ticks);
        // gain 3.0 -> full queue quadruples the interval
        assert_eq!(full, s.nominal_interval_ticks * 4);
    }

    #[test]
    fn test_interval_recovers_as_backlog_drains() {
        let s = scheduler();
        assert!(s.effective_interval(0.25) < s.effective_interval(0.75));
        assert_eq!(s.effective_interval(0.0), s.nominal_interval_ticks);
    }

    #[test]
    fn test_should_spawn_respects_schedule() {
        let mut s = scheduler();
        assert!(s.should_spawn(0, 0.0));
        // Next spawn is nominal_interval ticks out
        for tick in 1..s.nominal_interval_ticks {
            assert!(!s.should_spawn(tick, 0.0));
        }
        assert!(s.should_spawn(s.nominal_interval_ticks, 0.0));
    }

    #[test]
    fn test_backlog_fraction_clamped() {
        let s = scheduler();
        assert_eq!(s.effective_interval(2.0), s.effective_interval(1.0));
        assert_eq!(s.effective_interval(-1.0), s.effective_interval(0.0));
    }
}
