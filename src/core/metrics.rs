//! Periodic sampling of pool state and the run's final result.

use super::errors::{InvariantViolation, SimError};
use super::event::SimEvent;
use super::event_scheduler::EventScheduler;
use super::parts_pool::PartsPool;
use super::repair::RepairCoordinator;
use super::types::SimTime;
use serde::{Deserialize, Serialize};

/// Relative slack within which a tick time counts as landing on the horizon.
const HORIZON_SNAP: f64 = 1e-9;

/// `served / arrivals`, with no arrivals counting as fully satisfied.
pub fn satisfaction_rate(served: u64, arrivals: u64) -> f64 {
    if arrivals == 0 {
        1.0
    } else {
        served as f64 / arrivals as f64
    }
}

/// One timestamped observation of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub time: SimTime,
    pub available: usize,
    pub backlog_length: usize,
    pub in_repair_count: usize,
    pub satisfaction_rate: f64,
    pub total_arrivals: u64,
    pub total_served: u64,
}

/// Wait-for-part statistics over every served vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaitStats {
    pub served: u64,
    /// Served vehicles that had to wait in the queue first
    pub queued: u64,
    pub mean_wait: SimTime,
    pub max_wait: SimTime,
}

/// System state at the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub satisfaction_rate: f64,
    pub total_arrivals: u64,
    pub served: u64,
    pub backlog: usize,
    pub available_supply: usize,
    pub in_repair: usize,
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub snapshots: Vec<MetricSnapshot>,
    pub total_arrivals: u64,
    pub total_served: u64,
    pub final_metrics: FinalMetrics,
    pub wait_stats: WaitStats,
}

impl SimulationResult {
    /// `(time, available, backlog, in_repair, satisfaction)` per snapshot,
    /// the shape plotting layers consume.
    pub fn series(&self) -> Vec<(SimTime, usize, usize, usize, f64)> {
        self.snapshots
            .iter()
            .map(|s| {
                (
                    s.time,
                    s.available,
                    s.backlog_length,
                    s.in_repair_count,
                    s.satisfaction_rate,
                )
            })
            .collect()
    }

    /// Snapshot taken exactly at `time`, if any
    pub fn snapshot_at(&self, time: SimTime) -> Option<&MetricSnapshot> {
        self.snapshots.iter().find(|s| s.time == time)
    }

    pub fn satisfaction_rate(&self) -> f64 {
        self.final_metrics.satisfaction_rate
    }
}

/// Samples the pool every `record_interval` from t=0 up to the horizon.
///
/// Pure observer: it reads the pool and counters but never changes them.
#[derive(Debug)]
pub struct MetricsRecorder {
    record_interval: SimTime,
    horizon: SimTime,
    snapshots: Vec<MetricSnapshot>,
}

impl MetricsRecorder {
    pub fn new(record_interval: SimTime, horizon: SimTime) -> Self {
        Self {
            record_interval,
            horizon,
            snapshots: Vec::new(),
        }
    }

    /// Schedule the first sample at t=0
    pub fn start(&mut self, scheduler: &mut EventScheduler<SimEvent>) -> Result<(), SimError> {
        if let Some(time) = self.tick_time(0) {
            scheduler.schedule_at(time, SimEvent::RecordMetrics { tick: 0 })?;
        }
        Ok(())
    }

    pub fn on_record(
        &mut self,
        tick: u64,
        scheduler: &mut EventScheduler<SimEvent>,
        pool: &PartsPool,
        total_arrivals: u64,
        coordinator: &RepairCoordinator,
    ) -> Result<(), SimError> {
        let now = scheduler.now();
        let available = pool.available();
        let in_repair = coordinator.in_repair();
        let capacity = pool.capacity();

        if available + in_repair != capacity {
            return Err(InvariantViolation::Conservation {
                time: now,
                available,
                in_repair,
                capacity,
            }
            .into());
        }

        let total_served = coordinator.total_served();
        self.snapshots.push(MetricSnapshot {
            time: now,
            available,
            backlog_length: pool.backlog(),
            in_repair_count: in_repair,
            satisfaction_rate: satisfaction_rate(total_served, total_arrivals),
            total_arrivals,
            total_served,
        });

        if now >= self.horizon {
            return Ok(());
        }
        if let Some(time) = self.tick_time(tick + 1) {
            scheduler.schedule_at(time, SimEvent::RecordMetrics { tick: tick + 1 })?;
        }

        Ok(())
    }

    /// Nominal time of the `tick`-th sample. Computed by multiplication so
    /// long runs don't accumulate rounding drift.
    fn tick_time(&self, tick: u64) -> Option<SimTime> {
        let time = tick as f64 * self.record_interval;
        if time <= self.horizon {
            Some(time)
        } else if time - self.horizon <= HORIZON_SNAP * self.horizon.max(1.0) {
            Some(self.horizon)
        } else {
            None
        }
    }

    pub fn snapshots(&self) -> &[MetricSnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<MetricSnapshot> {
        self.snapshots
    }
}
