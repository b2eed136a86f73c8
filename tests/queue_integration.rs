//! Integration tests for the bounded queue, overflow policies, and the
//! backlog-driven spawn throttle

use shadow_legion::core::config::{OverflowPolicy, SimulationConfig};
use shadow_legion::core::types::{Family, Rank, StatBlock};
use shadow_legion::encounter::generator::materialize_mob;
use shadow_legion::encounter::spawner::SpawnScheduler;
use shadow_legion::extraction::queue::{EnqueueResult, ExtractionQueue};
use shadow_legion::extraction::{AgentSnapshot, ExtractionQueueEntry};
use shadow_legion::roster::store::RosterStore;
use shadow_legion::sim::context::SimContext;

fn entry(config: &SimulationConfig, tag: u64) -> ExtractionQueueEntry {
    ExtractionQueueEntry {
        mob: materialize_mob(Rank::C, Family::Beast, 1.0, config),
        agent: AgentSnapshot {
            stats: StatBlock::new(300.0, 300.0, 300.0, 300.0, 120.0),
            rank: Rank::B,
        },
        defeated_at: tag,
    }
}

/// Scenario: queue at capacity C, then one more enqueue. Both documented
/// policies must neither panic nor corrupt the existing entries.
#[test]
fn test_overflow_at_capacity_follows_policy() {
    let config = SimulationConfig::default();
    let capacity = 8;

    for policy in [OverflowPolicy::RejectNew, OverflowPolicy::EvictOldest] {
        let mut queue = ExtractionQueue::new(capacity, policy);
        for tag in 0..capacity as u64 {
            assert!(matches!(
                queue.enqueue(entry(&config, tag)),
                EnqueueResult::Accepted
            ));
        }

        let result = queue.enqueue(entry(&config, 999));
        assert_eq!(queue.len(), capacity);

        let tags: Vec<u64> = queue.abandon().iter().map(|e| e.defeated_at).collect();
        match (policy, result) {
            (OverflowPolicy::RejectNew, EnqueueResult::Rejected(lost)) => {
                assert_eq!(lost.defeated_at, 999);
                assert_eq!(tags, (0..capacity as u64).collect::<Vec<_>>());
            }
            (OverflowPolicy::EvictOldest, EnqueueResult::Evicted(lost)) => {
                assert_eq!(lost.defeated_at, 0);
                let mut expected: Vec<u64> = (1..capacity as u64).collect();
                expected.push(999);
                assert_eq!(tags, expected);
            }
            (_, other) => panic!("unexpected result {:?}", other),
        }
    }
}

/// Entries are attempted strictly in enqueue order within one drain.
#[test]
fn test_drain_processes_fifo() {
    let mut ctx = SimContext::seeded(17);
    let mut queue = ExtractionQueue::new(32, OverflowPolicy::RejectNew);
    let mut roster = RosterStore::new();

    for tag in 0..12 {
        queue.enqueue(entry(&ctx.config, tag));
    }

    // Drain in two batches; the second batch starts where the first ended
    queue.drain(6, 50, &mut ctx, &mut roster);
    let remaining: Vec<u64> = queue.abandon().iter().map(|e| e.defeated_at).collect();
    assert_eq!(remaining, vec![6, 7, 8, 9, 10, 11]);
}

/// Sustained producer pressure with periodic draining: the throttle slows
/// spawning as the backlog grows, so occupancy stabilizes under capacity.
#[test]
fn test_throttle_balances_sustained_load() {
    let mut ctx = SimContext::seeded(23);
    let config = ctx.config.clone();
    let mut queue = ExtractionQueue::new(config.queue_capacity, OverflowPolicy::RejectNew);
    let mut scheduler = SpawnScheduler::new(&config);
    let mut roster = RosterStore::new();

    let mut rejected = 0;
    for tick in 1..=2000u64 {
        if scheduler.should_spawn(tick, queue.backlog_fraction()) {
            if let EnqueueResult::Rejected(_) = queue.enqueue(entry(&config, tick)) {
                rejected += 1;
            }
        }
        if tick % config.drain_interval_ticks == 0 {
            queue.drain(config.drain_batch_size, tick, &mut ctx, &mut roster);
        }
    }

    // Negative feedback keeps the queue from pinning at capacity
    assert_eq!(rejected, 0);
    assert!(queue.backlog_fraction() < 0.75);
}

/// A deeper backlog stretches the spawn interval more; recovery follows
/// drain progress.
#[test]
fn test_throttle_tracks_backlog_depth() {
    let config = SimulationConfig::default();
    let scheduler = SpawnScheduler::new(&config);

    let idle = scheduler.effective_interval(0.0);
    let busy = scheduler.effective_interval(0.5);
    let full = scheduler.effective_interval(1.0);
    assert!(idle < busy);
    assert!(busy < full);
}
