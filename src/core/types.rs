use serde::{Deserialize, Serialize};

/// Virtual simulation time. Only the scheduler advances it.
pub type SimTime = f64;

/// Handle returned when an event is scheduled; equal to its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) u64);

impl EventId {
    /// Get the raw sequence number
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier assigned to each arriving vehicle, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub(crate) u64);

impl VehicleId {
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vehicle-{}", self.0)
    }
}

/// A demand unit. Lives only until it is served.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub arrival_time: SimTime,
    pub service_time: Option<SimTime>,
}

impl Vehicle {
    pub fn new(id: VehicleId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            service_time: None,
        }
    }

    /// Time spent waiting for a part, once served
    pub fn wait_time(&self) -> Option<SimTime> {
        self.service_time.map(|served| served - self.arrival_time)
    }
}

/// A vehicle parked in the pool's wait queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRequest {
    pub arrival_time: SimTime,
    pub vehicle: Vehicle,
}

impl PendingRequest {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            arrival_time: vehicle.arrival_time,
            vehicle,
        }
    }
}
