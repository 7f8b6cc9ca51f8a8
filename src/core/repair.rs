use super::errors::{InvariantViolation, SimError};
use super::event::SimEvent;
use super::event_scheduler::EventScheduler;
use super::metrics::WaitStats;
use super::parts_pool::PartsPool;
use super::random_source::RandomSource;
use super::types::{SimTime, Vehicle};
use log::debug;

/// Pairs every allocation with exactly one scheduled repair return.
#[derive(Debug, Default)]
pub struct RepairCoordinator {
    in_repair: usize,
    total_served: u64,
    served_from_queue: u64,
    total_wait: SimTime,
    max_wait: SimTime,
}

impl RepairCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A vehicle got its part at the current time: count it as served and
    /// send the removed part to repair.
    pub fn on_service_completed(
        &mut self,
        mut vehicle: Vehicle,
        from_queue: bool,
        scheduler: &mut EventScheduler<SimEvent>,
        source: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        let now = scheduler.now();
        vehicle.service_time = Some(now);
        let wait = vehicle.wait_time().unwrap_or(0.0);

        let duration = source.next_repair_duration();
        if !(duration >= 0.0) {
            return Err(SimError::InvalidDelay {
                kind: "repair",
                delay: duration,
            });
        }

        self.total_served += 1;
        if from_queue {
            self.served_from_queue += 1;
        }
        self.total_wait += wait;
        self.max_wait = self.max_wait.max(wait);
        self.in_repair += 1;

        scheduler.schedule(duration, SimEvent::RepairComplete { vehicle: vehicle.id })?;
        debug!(
            "{} served at t={} (waited {}), part back at t={}",
            vehicle.id,
            now,
            wait,
            now + duration
        );

        Ok(())
    }

    /// A repaired part comes back. Any queued vehicles it frees up are
    /// served immediately, each starting its own repair.
    pub fn on_repair_complete(
        &mut self,
        scheduler: &mut EventScheduler<SimEvent>,
        pool: &mut PartsPool,
        source: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        let now = scheduler.now();
        if self.in_repair == 0 {
            return Err(InvariantViolation::UnmatchedRelease { time: now }.into());
        }
        self.in_repair -= 1;

        for request in pool.release(now)? {
            self.on_service_completed(request.vehicle, true, scheduler, source)?;
        }

        Ok(())
    }

    /// Parts currently out for repair
    pub fn in_repair(&self) -> usize {
        self.in_repair
    }

    pub fn total_served(&self) -> u64 {
        self.total_served
    }

    pub fn wait_stats(&self) -> WaitStats {
        let mean_wait = if self.total_served == 0 {
            0.0
        } else {
            self.total_wait / self.total_served as f64
        };

        WaitStats {
            served: self.total_served,
            queued: self.served_from_queue,
            mean_wait,
            max_wait: self.max_wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random_source::ScriptedSource;
    use crate::core::types::{PendingRequest, VehicleId};

    #[test]
    fn test_service_schedules_one_return() {
        let mut scheduler = EventScheduler::new();
        let mut source = ScriptedSource::no_arrivals(2.5);
        let mut coordinator = RepairCoordinator::new();

        coordinator
            .on_service_completed(Vehicle::new(VehicleId(0), 0.0), false, &mut scheduler, &mut source)
            .unwrap();

        assert_eq!(coordinator.in_repair(), 1);
        assert_eq!(coordinator.total_served(), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.peek_next_time(), Some(2.5));
    }

    #[test]
    fn test_return_hands_part_to_waiter() {
        let mut scheduler = EventScheduler::new();
        let mut source = ScriptedSource::no_arrivals(1.0);
        let mut coordinator = RepairCoordinator::new();
        let mut pool = PartsPool::new(1);

        assert!(pool.try_take());
        coordinator
            .on_service_completed(Vehicle::new(VehicleId(0), 0.0), false, &mut scheduler, &mut source)
            .unwrap();
        pool.enqueue_waiter(PendingRequest::new(Vehicle::new(VehicleId(1), 0.25)));

        let mut fired = 0;
        scheduler
            .run_until(1.0, |s, event| {
                assert!(matches!(event, SimEvent::RepairComplete { .. }));
                fired += 1;
                coordinator.on_repair_complete(s, &mut pool, &mut source)
            })
            .unwrap();

        assert_eq!(fired, 1);
        assert_eq!(pool.backlog(), 0);
        assert_eq!(pool.available(), 0);
        assert_eq!(coordinator.in_repair(), 1);

        let stats = coordinator.wait_stats();
        assert_eq!(stats.served, 2);
        assert_eq!(stats.queued, 1);
        assert_eq!(stats.max_wait, 0.75);
        assert_eq!(stats.mean_wait, 0.375);
    }

    #[test]
    fn test_unmatched_return_is_fatal() {
        let mut scheduler = EventScheduler::new();
        let mut source = ScriptedSource::no_arrivals(1.0);
        let mut coordinator = RepairCoordinator::new();
        let mut pool = PartsPool::new(1);

        let err = coordinator
            .on_repair_complete(&mut scheduler, &mut pool, &mut source)
            .unwrap_err();
        assert_eq!(err, SimError::Invariant(InvariantViolation::UnmatchedRelease { time: 0.0 }));
    }

    #[test]
    fn test_negative_repair_duration_rejected() {
        let mut scheduler = EventScheduler::new();
        let mut source = ScriptedSource::no_arrivals(-1.0);
        let mut coordinator = RepairCoordinator::new();

        let err = coordinator
            .on_service_completed(Vehicle::new(VehicleId(0), 0.0), false, &mut scheduler, &mut source)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidDelay { kind: "repair", .. }));
        assert_eq!(coordinator.in_repair(), 0);
        assert!(!scheduler.has_events());
    }
}
