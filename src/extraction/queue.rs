//! Bounded extraction queue with batch draining
//!
//! A FIFO buffer of defeated-mob events with a hard capacity bound. The
//! overflow policy is explicit configuration (reject-new or evict-oldest);
//! neither panics nor disturbs entries already queued. Draining pops a
//! bounded batch per invocation so a deep backlog can never starve the
//! rest of the tick.

use std::collections::VecDeque;

use crate::core::config::OverflowPolicy;
use crate::core::types::{Tick, UnitId};
use crate::extraction::attempt::{attempt, Outcome};
use crate::extraction::ExtractionQueueEntry;
use crate::roster::store::RosterStore;
use crate::sim::context::SimContext;

/// What became of an `enqueue` call at the capacity boundary
#[derive(Debug)]
pub enum EnqueueResult {
    Accepted,
    /// RejectNew policy: the incoming entry comes back to the caller
    Rejected(Box<ExtractionQueueEntry>),
    /// EvictOldest policy: the displaced entry comes back for the caller's
    /// loss-notification policy
    Evicted(Box<ExtractionQueueEntry>),
}

/// Summary of one drain invocation
#[derive(Debug, Default)]
pub struct DrainReport {
    pub processed: usize,
    pub recruited: Vec<UnitId>,
    pub exhausted: usize,
}

#[derive(Debug)]
pub struct ExtractionQueue {
    entries: VecDeque<ExtractionQueueEntry>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl ExtractionQueue {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupancy fraction in [0, 1]; the spawn throttle's feedback signal
    pub fn backlog_fraction(&self) -> f64 {
        self.entries.len() as f64 / self.capacity as f64
    }

    /// Append a defeated-mob event, applying the configured overflow
    /// policy at the capacity bound.
    pub fn enqueue(&mut self, entry: ExtractionQueueEntry) -> EnqueueResult {
        if self.entries.len() < self.capacity {
            self.entries.push_back(entry);
            return EnqueueResult::Accepted;
        }

        match self.policy {
            OverflowPolicy::RejectNew => {
                tracing::warn!(capacity = self.capacity, "queue full, rejecting entry");
                EnqueueResult::Rejected(Box::new(entry))
            }
            OverflowPolicy::EvictOldest => {
                // Capacity is validated positive, so front exists here
                let evicted = self.entries.pop_front();
                self.entries.push_back(entry);
                tracing::warn!(capacity = self.capacity, "queue full, evicting oldest");
                match evicted {
                    Some(old) => EnqueueResult::Evicted(Box::new(old)),
                    None => EnqueueResult::Accepted,
                }
            }
        }
    }

    /// Pop up to `batch_size` entries in FIFO order and route each through
    /// the extraction engine, inserting successes into the roster. Runs to
    /// completion synchronously; per-tick work is bounded by the batch.
    pub fn drain(
        &mut self,
        batch_size: usize,
        now: Tick,
        ctx: &mut SimContext,
        roster: &mut RosterStore,
    ) -> DrainReport {
        let mut report = DrainReport::default();

        for _ in 0..batch_size {
            let Some(entry) = self.entries.pop_front() else {
                break;
            };
            report.processed += 1;

            match attempt(entry, now, ctx) {
                Outcome::Success(unit) => {
                    let id = roster.insert_full(*unit);
                    report.recruited.push(id);
                }
                Outcome::Exhausted { .. } => {
                    report.exhausted += 1;
                }
            }
        }

        if report.processed > 0 {
            tracing::debug!(
                processed = report.processed,
                recruited = report.recruited.len(),
                exhausted = report.exhausted,
                remaining = self.entries.len(),
                "drain batch complete"
            );
        }

        report
    }

    /// Zone abandonment: discard all pending entries without attempting
    /// them. The entries come back so the configured disposal policy
    /// (silent drop vs loss notification) can act; their mobs stay
    /// defeated either way.
    pub fn abandon(&mut self) -> Vec<ExtractionQueueEntry> {
        self.entries.drain(..).collect()
    }
}
