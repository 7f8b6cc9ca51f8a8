//! Samplers for interarrival and repair delays.
//!
//! The engine only sees the [`RandomSource`] trait, so tests can swap in a
//! [`ScriptedSource`] and get exact event times.

use super::errors::ConfigError;
use super::types::SimTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use std::collections::VecDeque;

/// Supplies every random delay a run needs.
///
/// Implementations may return `f64::INFINITY` from `next_interarrival` to
/// mean "no further arrivals". Negative or NaN values are contract
/// violations and abort the run.
pub trait RandomSource: Send {
    fn next_interarrival(&mut self) -> SimTime;
    fn next_repair_duration(&mut self) -> SimTime;
}

/// Exponential interarrivals at `demand_rate`, constant repair time.
pub struct StochasticSource {
    rng: StdRng,
    interarrival: Exp<f64>,
    repair_time: SimTime,
}

impl StochasticSource {
    /// Seeded source; `None` draws the seed from OS entropy.
    pub fn new(demand_rate: f64, repair_time: SimTime, seed: Option<u64>) -> Result<Self, ConfigError> {
        let interarrival = Exp::new(demand_rate).map_err(|_| ConfigError::NonPositive {
            name: "demand_rate",
            value: demand_rate,
        })?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            interarrival,
            repair_time,
        })
    }
}

impl RandomSource for StochasticSource {
    fn next_interarrival(&mut self) -> SimTime {
        self.interarrival.sample(&mut self.rng)
    }

    fn next_repair_duration(&mut self) -> SimTime {
        self.repair_time
    }
}

/// Replays fixed delay sequences.
///
/// Once a script runs out, its fallback value is returned forever.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    interarrivals: VecDeque<SimTime>,
    interarrival_fallback: SimTime,
    repairs: VecDeque<SimTime>,
    repair_fallback: SimTime,
}

impl ScriptedSource {
    /// Same interarrival every time, constant repair.
    pub fn constant(interarrival: SimTime, repair: SimTime) -> Self {
        Self {
            interarrivals: VecDeque::new(),
            interarrival_fallback: interarrival,
            repairs: VecDeque::new(),
            repair_fallback: repair,
        }
    }

    /// Arrivals exactly every `interval`, starting at t=0.
    pub fn periodic_from_zero(interval: SimTime, repair: SimTime) -> Self {
        Self::constant(interval, repair).with_interarrivals([0.0])
    }

    /// Arrivals at the given delays, then none.
    pub fn arrivals_then_none<I>(delays: I, repair: SimTime) -> Self
    where
        I: IntoIterator<Item = SimTime>,
    {
        Self::constant(SimTime::INFINITY, repair).with_interarrivals(delays)
    }

    /// A source that never produces an arrival.
    pub fn no_arrivals(repair: SimTime) -> Self {
        Self::constant(SimTime::INFINITY, repair)
    }

    pub fn with_interarrivals<I>(mut self, delays: I) -> Self
    where
        I: IntoIterator<Item = SimTime>,
    {
        self.interarrivals.extend(delays);
        self
    }

    pub fn with_repairs<I>(mut self, durations: I) -> Self
    where
        I: IntoIterator<Item = SimTime>,
    {
        self.repairs.extend(durations);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn next_interarrival(&mut self) -> SimTime {
        self.interarrivals
            .pop_front()
            .unwrap_or(self.interarrival_fallback)
    }

    fn next_repair_duration(&mut self) -> SimTime {
        self.repairs.pop_front().unwrap_or(self.repair_fallback)
    }
}
