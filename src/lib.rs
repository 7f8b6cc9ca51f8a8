//! Discrete-event simulation of a closed-loop repairable-spares inventory.
//!
//! A fixed pool of parts serves randomly arriving vehicles. Every part handed
//! out goes to repair and comes back after the repair time. The engine runs
//! on virtual time and reports periodic snapshots of the pool.
//!
//! ```
//! use sparesim::{run, SimulationConfig};
//!
//! let config = SimulationConfig::new()
//!     .with_initial_supply(4)
//!     .with_demand_rate(0.8)
//!     .with_repair_time(3.0)
//!     .with_simulation_time(50.0)
//!     .with_seed(7);
//!
//! let result = run(&config).unwrap();
//! assert_eq!(result.snapshots.len(), 51);
//! ```

pub mod core;

// Re-export commonly used types
pub use crate::core::errors::{ConfigError, InvariantViolation, SimError};
pub use crate::core::execution::{
    run, run_replications, run_with_source, ConcurrencyMode, ReplicationPlan, ReplicationSummary,
    SimulationConfig, SimulationRunner,
};
pub use crate::core::metrics::{FinalMetrics, MetricSnapshot, SimulationResult, WaitStats};
pub use crate::core::random_source::{RandomSource, ScriptedSource, StochasticSource};
pub use crate::core::types::SimTime;
