use super::types::SimTime;

/// Rejected configuration, reported before any event runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("initial_supply must be greater than zero")]
    ZeroSupply,

    /// A float parameter was zero, negative, NaN or infinite.
    #[error("{name} must be a finite value greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("record_interval ({record_interval}) exceeds simulation_time ({simulation_time})")]
    IntervalExceedsHorizon {
        record_interval: f64,
        simulation_time: f64,
    },
}

/// Broken engine bookkeeping. Always fatal: the run stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("release at t={time} would overfill the pool (available {available} of {capacity})")]
    PoolOverfull {
        time: SimTime,
        available: usize,
        capacity: usize,
    },

    #[error("repair return at t={time} has no matching allocation")]
    UnmatchedRelease { time: SimTime },

    #[error(
        "conservation broken at t={time}: available {available} + in_repair {in_repair} != capacity {capacity}"
    )]
    Conservation {
        time: SimTime,
        available: usize,
        in_repair: usize,
        capacity: usize,
    },

    #[error("clock would move backwards from {now} to {due}")]
    ClockRegression { now: SimTime, due: SimTime },
}

/// Everything `run` can fail with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    /// A sampled or requested delay was negative or NaN.
    #[error("invalid {kind} delay {delay}")]
    InvalidDelay { kind: &'static str, delay: f64 },

    #[error("failed to build replication thread pool: {0}")]
    ThreadPool(String),
}
