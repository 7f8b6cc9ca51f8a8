use super::types::VehicleId;

/// The actions a run can schedule. Each variant is one step of a process;
/// the runner dispatches on it when the event comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A vehicle arrives and asks the pool for a part
    Arrival,
    /// The part taken by `vehicle` finishes repair and goes back into the pool
    RepairComplete { vehicle: VehicleId },
    /// The recorder takes its `tick`-th sample
    RecordMetrics { tick: u64 },
}

impl SimEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::Arrival => "arrival",
            SimEvent::RepairComplete { .. } => "repair_complete",
            SimEvent::RecordMetrics { .. } => "record_metrics",
        }
    }
}
