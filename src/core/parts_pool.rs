use super::errors::InvariantViolation;
use super::types::{PendingRequest, SimTime};
use log::debug;
use std::collections::VecDeque;

/// Bounded container of interchangeable parts with a FIFO wait queue.
///
/// Allocation is "try, then queue": callers that fail `try_take` park a
/// [`PendingRequest`], and `release` hands freed units to the queue head first.
#[derive(Debug, Clone)]
pub struct PartsPool {
    capacity: usize,
    available: usize,
    waiters: VecDeque<PendingRequest>,
}

impl PartsPool {
    /// A full pool holding `capacity` units
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            available: capacity,
            waiters: VecDeque::new(),
        }
    }

    /// Take one unit if any is on the shelf.
    pub fn try_take(&mut self) -> bool {
        if self.available > 0 {
            self.available -= 1;
            true
        } else {
            false
        }
    }

    /// Park a request at the tail of the wait queue
    pub fn enqueue_waiter(&mut self, request: PendingRequest) {
        debug!(
            "{} queued at t={} (backlog {})",
            request.vehicle.id,
            request.arrival_time,
            self.waiters.len() + 1
        );
        self.waiters.push_back(request);
    }

    /// Return one unit to the pool and allocate it onward.
    ///
    /// Queued requests are served strictly from the head while units remain;
    /// the returned requests each already hold one unit, in arrival order.
    pub fn release(&mut self, now: SimTime) -> Result<Vec<PendingRequest>, InvariantViolation> {
        if self.available >= self.capacity {
            return Err(InvariantViolation::PoolOverfull {
                time: now,
                available: self.available,
                capacity: self.capacity,
            });
        }
        self.available += 1;

        let mut resumed = Vec::new();
        while self.available > 0 {
            let Some(request) = self.waiters.pop_front() else {
                break;
            };
            self.available -= 1;
            debug!(
                "{} resumed at t={} after waiting {}",
                request.vehicle.id,
                now,
                now - request.arrival_time
            );
            resumed.push(request);
        }

        Ok(resumed)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.available
    }

    /// Number of queued, unallocated requests
    pub fn backlog(&self) -> usize {
        self.waiters.len()
    }
}
