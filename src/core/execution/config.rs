//! Configuration for sparesim runs
//!
//! `SimulationConfig` carries the model parameters of a single run;
//! `ReplicationPlan` says how many seeded runs to make and whether to spread
//! them over a rayon thread pool.

use crate::core::errors::ConfigError;
use crate::core::types::SimTime;
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Replications run one after another on the calling thread
    #[default]
    Sequential,
    /// Replications run in parallel on a Rayon thread pool
    Rayon,
}

/// Model parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total number of parts; the pool starts full
    pub initial_supply: usize,
    /// Mean vehicle arrivals per unit of simulated time
    pub demand_rate: f64,
    /// Time a part spends in repair
    pub repair_time: SimTime,
    /// Horizon of the run
    pub simulation_time: SimTime,
    /// Sampling period of the metrics recorder
    pub record_interval: SimTime,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy
    pub random_seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a new configuration with default values
    ///
    /// Defaults: 10 parts, 1 arrival per time unit, 5 time units of repair,
    /// a 100 time unit horizon sampled every time unit, unseeded.
    pub fn new() -> Self {
        Self {
            initial_supply: 10,
            demand_rate: 1.0,
            repair_time: 5.0,
            simulation_time: 100.0,
            record_interval: 1.0,
            random_seed: None,
        }
    }

    pub fn with_initial_supply(mut self, supply: usize) -> Self {
        self.initial_supply = supply;
        self
    }

    pub fn with_demand_rate(mut self, rate: f64) -> Self {
        self.demand_rate = rate;
        self
    }

    pub fn with_repair_time(mut self, time: SimTime) -> Self {
        self.repair_time = time;
        self
    }

    pub fn with_simulation_time(mut self, time: SimTime) -> Self {
        self.simulation_time = time;
        self
    }

    pub fn with_record_interval(mut self, interval: SimTime) -> Self {
        self.record_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Check every parameter. Nothing is clamped: the first bad value is
    /// reported as is.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_supply == 0 {
            return Err(ConfigError::ZeroSupply);
        }

        let positive = [
            ("demand_rate", self.demand_rate),
            ("repair_time", self.repair_time),
            ("simulation_time", self.simulation_time),
            ("record_interval", self.record_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.record_interval > self.simulation_time {
            return Err(ConfigError::IntervalExceedsHorizon {
                record_interval: self.record_interval,
                simulation_time: self.simulation_time,
            });
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch of independent runs sharing one model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationPlan {
    /// One run per seed, reported in this order
    pub seeds: Vec<u64>,
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel execution
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
}

impl ReplicationPlan {
    pub fn new<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            seeds: seeds.into_iter().collect(),
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
        }
    }

    /// Set the concurrency mode for the batch
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}
