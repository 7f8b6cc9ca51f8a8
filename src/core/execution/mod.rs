pub mod config;
pub mod replications;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{ConcurrencyMode, ReplicationPlan, SimulationConfig};
pub use replications::{run_replications, Replication, ReplicationSummary};
pub use simulation_engine::{run, run_with_source, SimulationRunner};
