use super::errors::SimError;
use super::event::SimEvent;
use super::event_scheduler::EventScheduler;
use super::parts_pool::PartsPool;
use super::random_source::RandomSource;
use super::repair::RepairCoordinator;
use super::types::{PendingRequest, SimTime, Vehicle, VehicleId};
use log::debug;

/// Emits vehicle arrivals at sampled intervals until the horizon.
#[derive(Debug)]
pub struct ArrivalGenerator {
    horizon: SimTime,
    total_arrivals: u64,
    exhausted: bool,
}

impl ArrivalGenerator {
    pub fn new(horizon: SimTime) -> Self {
        Self {
            horizon,
            total_arrivals: 0,
            exhausted: false,
        }
    }

    /// Schedule the first arrival
    pub fn start(
        &mut self,
        scheduler: &mut EventScheduler<SimEvent>,
        source: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        self.schedule_next(scheduler, source)
    }

    /// Handle one arrival: serve it from the pool or queue it, then schedule
    /// the next one.
    pub fn on_arrival(
        &mut self,
        scheduler: &mut EventScheduler<SimEvent>,
        pool: &mut PartsPool,
        coordinator: &mut RepairCoordinator,
        source: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        let now = scheduler.now();
        let vehicle = Vehicle::new(VehicleId(self.total_arrivals), now);
        self.total_arrivals += 1;

        if pool.try_take() {
            coordinator.on_service_completed(vehicle, false, scheduler, source)?;
        } else {
            pool.enqueue_waiter(PendingRequest::new(vehicle));
        }

        self.schedule_next(scheduler, source)
    }

    fn schedule_next(
        &mut self,
        scheduler: &mut EventScheduler<SimEvent>,
        source: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        let delay = source.next_interarrival();
        if !(delay >= 0.0) {
            return Err(SimError::InvalidDelay {
                kind: "interarrival",
                delay,
            });
        }

        let next = scheduler.now() + delay;
        if next > self.horizon {
            debug!(
                "arrivals stop after {} (next would be t={})",
                self.total_arrivals, next
            );
            self.exhausted = true;
            return Ok(());
        }

        scheduler.schedule(delay, SimEvent::Arrival)?;
        Ok(())
    }

    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals
    }

    /// True once the next sampled arrival fell past the horizon
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
