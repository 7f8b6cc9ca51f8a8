use super::errors::{InvariantViolation, SimError};
use super::types::{EventId, SimTime};
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent<E> {
    pub due_time: SimTime,
    pub sequence_num: u64,
    pub event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .due_time
            .total_cmp(&self.due_time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Virtual clock plus the pending event set.
///
/// Events are ordered by `(due_time, sequence_num)`; the sequence number is
/// assigned at scheduling time, so events due at the same instant fire in the
/// order they were scheduled.
pub struct EventScheduler<E> {
    event_queue: BinaryHeap<ScheduledEvent<E>>,
    sequence_counter: u64,
    now: SimTime,
    events_executed: u64,
}

impl<E> EventScheduler<E> {
    /// Create a new EventScheduler with the clock at zero
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            now: 0.0,
            events_executed: 0,
        }
    }

    /// Schedule an event to fire `delay` time units from now.
    ///
    /// Negative and NaN delays are rejected. An infinite delay is accepted but
    /// the event will never come due within a finite horizon.
    pub fn schedule(&mut self, delay: SimTime, event: E) -> Result<EventId, SimError> {
        if !(delay >= 0.0) {
            return Err(SimError::InvalidDelay {
                kind: "scheduled",
                delay,
            });
        }

        self.schedule_at(self.now + delay, event)
    }

    /// Schedule an event at an absolute time, which must not be in the past.
    pub fn schedule_at(&mut self, due_time: SimTime, event: E) -> Result<EventId, SimError> {
        if !(due_time >= self.now) {
            return Err(SimError::InvalidDelay {
                kind: "scheduled",
                delay: due_time - self.now,
            });
        }

        let id = EventId(self.sequence_counter);
        self.event_queue.push(ScheduledEvent {
            due_time,
            sequence_num: self.sequence_counter,
            event,
        });
        self.sequence_counter += 1;

        Ok(id)
    }

    /// Pop and dispatch events in order until the queue is empty or the next
    /// event is due after `horizon`. Events due exactly at `horizon` run.
    ///
    /// The handler gets the scheduler back so it can schedule follow-up
    /// events. The first handler error stops the loop and is returned.
    pub fn run_until<F>(&mut self, horizon: SimTime, mut handler: F) -> Result<(), SimError>
    where
        F: FnMut(&mut Self, E) -> Result<(), SimError>,
    {
        while let Some(due) = self.peek_next_time() {
            if due > horizon {
                break;
            }

            let Some(scheduled) = self.event_queue.pop() else {
                break;
            };

            if scheduled.due_time < self.now {
                return Err(InvariantViolation::ClockRegression {
                    now: self.now,
                    due: scheduled.due_time,
                }
                .into());
            }

            if scheduled.due_time != self.now {
                trace!("clock {} -> {}", self.now, scheduled.due_time);
            }
            self.now = scheduled.due_time;
            self.events_executed += 1;

            handler(self, scheduled.event)?;
        }

        Ok(())
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Number of events waiting to fire
    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Due time of the next event without removing it
    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|event| event.due_time)
    }

    /// Number of events dispatched so far
    pub fn events_executed(&self) -> u64 {
        self.events_executed
    }
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
