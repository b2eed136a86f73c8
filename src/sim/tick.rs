//! Tick system - orchestrates one zone instance's progression pipeline
//!
//! Each tick advances, in order: throttled spawn decision -> combat
//! progression -> defeated-mob enqueue -> periodic batch drain -> periodic
//! tiering pass. Everything runs to completion synchronously; suspension
//! points are tick boundaries only, and per-tick work is bounded by the
//! drain batch and roster size.
//!
//! The real combat loop is an external collaborator. A minimal stand-in
//! lives here (mobs fall after a configured lifetime, defeats credit the
//! roster's lead unit) so the demo binary and integration tests can drive
//! the pipeline end to end.

use crate::core::error::Result;
use crate::core::types::{Family, Rank, Tick, UnitId};
use crate::encounter::generator::{generate, Mob};
use crate::encounter::spawner::SpawnScheduler;
use crate::encounter::zone::Zone;
use crate::extraction::queue::{EnqueueResult, ExtractionQueue};
use crate::extraction::{AgentSnapshot, ExtractionQueueEntry};
use crate::growth::natural::accrue_combat_time;
use crate::growth::xp::grant_xp;
use crate::roster::store::RosterStore;
use crate::roster::tiering::{combat_power, run_tiering_pass};
use crate::sim::context::SimContext;

/// Events generated during a simulation tick, for the caller's log
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    MobSpawned {
        rank: Rank,
        family: Family,
        tick: Tick,
    },
    MobDefeated {
        rank: Rank,
        tick: Tick,
    },
    /// The queue hit capacity; an entry was lost per the configured policy
    QueueOverflow {
        rejected_new: bool,
        tick: Tick,
    },
    UnitExtracted {
        unit_id: UnitId,
        rank: Rank,
        tick: Tick,
    },
    /// Normal terminal outcome: the retry budget ran dry
    ExtractionExhausted {
        count: usize,
        tick: Tick,
    },
    UnitLeveledUp {
        unit_id: UnitId,
        new_level: u32,
        tick: Tick,
    },
    TieringCompleted {
        promoted: usize,
        demoted: usize,
        tick: Tick,
    },
}

/// A live mob and the tick the stand-in combat loop fells it
#[derive(Debug)]
struct ActiveMob {
    mob: Mob,
    dies_at: Tick,
}

/// One zone instance's simulation state plus the shared roster
#[derive(Debug)]
pub struct GateSimulation {
    zone: Zone,
    agent: AgentSnapshot,
    spawner: SpawnScheduler,
    queue: ExtractionQueue,
    roster: RosterStore,
    active_mobs: Vec<ActiveMob>,
    tick: Tick,
}

impl GateSimulation {
    pub fn new(zone: Zone, agent: AgentSnapshot, ctx: &SimContext) -> Self {
        Self {
            zone,
            agent,
            spawner: SpawnScheduler::new(&ctx.config),
            queue: ExtractionQueue::new(ctx.config.queue_capacity, ctx.config.overflow_policy),
            roster: RosterStore::new(),
            active_mobs: Vec::new(),
            tick: 0,
        }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterStore {
        &mut self.roster
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn backlog_fraction(&self) -> f64 {
        self.queue.backlog_fraction()
    }

    pub fn active_mob_count(&self) -> usize {
        self.active_mobs.len()
    }

    /// Advance the simulation one tick
    pub fn run_tick(&mut self, ctx: &mut SimContext) -> Result<Vec<SimulationEvent>> {
        self.tick += 1;
        let now = self.tick;
        let mut events = Vec::new();

        // 1. Spawn, throttled by current backlog
        if self.spawner.should_spawn(now, self.queue.backlog_fraction()) {
            let mob = generate(&self.zone, ctx)?;
            events.push(SimulationEvent::MobSpawned {
                rank: mob.rank,
                family: mob.family,
                tick: now,
            });
            self.active_mobs.push(ActiveMob {
                mob,
                dies_at: now + ctx.config.mob_lifetime_ticks,
            });
        }

        // 2. Combat stand-in: fell mobs whose time is up
        let mut defeated = Vec::new();
        self.active_mobs.retain_mut(|active| {
            if active.dies_at <= now {
                defeated.push(active.mob.clone());
                false
            } else {
                true
            }
        });

        for mob in defeated {
            events.push(SimulationEvent::MobDefeated {
                rank: mob.rank,
                tick: now,
            });
            self.credit_lead_unit(ctx, now, &mut events);

            // 3. Each death produces exactly one queue entry
            let entry = ExtractionQueueEntry {
                mob,
                agent: self.agent,
                defeated_at: now,
            };
            match self.queue.enqueue(entry) {
                EnqueueResult::Accepted => {}
                EnqueueResult::Rejected(_) => {
                    events.push(SimulationEvent::QueueOverflow {
                        rejected_new: true,
                        tick: now,
                    });
                }
                EnqueueResult::Evicted(_) => {
                    events.push(SimulationEvent::QueueOverflow {
                        rejected_new: false,
                        tick: now,
                    });
                }
            }
        }

        // 4. Batch drain on its interval
        if now % ctx.config.drain_interval_ticks == 0 && !self.queue.is_empty() {
            let batch = ctx.config.drain_batch_size;
            let report = self.queue.drain(batch, now, ctx, &mut self.roster);
            for id in &report.recruited {
                if let Some(unit) = self.roster.get(*id) {
                    events.push(SimulationEvent::UnitExtracted {
                        unit_id: *id,
                        rank: unit.rank(),
                        tick: now,
                    });
                }
            }
            if report.exhausted > 0 {
                events.push(SimulationEvent::ExtractionExhausted {
                    count: report.exhausted,
                    tick: now,
                });
            }
        }

        // 5. Tiering pass on its interval
        if now % ctx.config.tiering_interval_ticks == 0 && !self.roster.is_empty() {
            let report = run_tiering_pass(&mut self.roster, &ctx.config);
            events.push(SimulationEvent::TieringCompleted {
                promoted: report.promoted,
                demoted: report.demoted,
                tick: now,
            });
        }

        Ok(events)
    }

    /// Credit the strongest Full unit with XP and combat time for a defeat
    /// its side participated in
    fn credit_lead_unit(
        &mut self,
        ctx: &SimContext,
        now: Tick,
        events: &mut Vec<SimulationEvent>,
    ) {
        let lead = self
            .roster
            .list_units()
            .iter()
            .filter(|u| u.is_full())
            .max_by(|a, b| {
                combat_power(a, &ctx.config).total_cmp(&combat_power(b, &ctx.config))
            })
            .map(|u| u.id());

        let Some(id) = lead else {
            return;
        };
        let Some(unit) = self.roster.materialize(id) else {
            return;
        };

        accrue_combat_time(unit, ctx.config.combat_seconds_per_defeat, &ctx.config);
        let gained = grant_xp(unit, ctx.config.xp_per_defeat, &ctx.config);
        if gained > 0 {
            events.push(SimulationEvent::UnitLeveledUp {
                unit_id: id,
                new_level: unit.level,
                tick: now,
            });
        }
    }

    /// Abandon this zone instance: pending entries are discarded without
    /// attempts (their mobs stay defeated) and handed back for the loss
    /// policy; live mobs despawn.
    pub fn abandon_zone(&mut self) -> Vec<ExtractionQueueEntry> {
        self.active_mobs.clear();
        self.queue.abandon()
    }
}
