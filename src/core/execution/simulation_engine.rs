use crate::core::arrivals::ArrivalGenerator;
use crate::core::errors::SimError;
use crate::core::event::SimEvent;
use crate::core::event_scheduler::EventScheduler;
use crate::core::execution::config::SimulationConfig;
use crate::core::metrics::{satisfaction_rate, FinalMetrics, MetricsRecorder, SimulationResult};
use crate::core::parts_pool::PartsPool;
use crate::core::random_source::{RandomSource, StochasticSource};
use crate::core::repair::RepairCoordinator;
use log::{debug, info, trace};

/// Owns every piece of state for one run: clock, pool, processes and the
/// recorder's log. Nothing outlives it, so runs are fully isolated.
pub struct SimulationRunner {
    config: SimulationConfig,
    scheduler: EventScheduler<SimEvent>,
    pool: PartsPool,
    arrivals: ArrivalGenerator,
    coordinator: RepairCoordinator,
    recorder: MetricsRecorder,
    source: Box<dyn RandomSource>,
}

impl SimulationRunner {
    /// Runner with the default exponential/constant sampler seeded from the
    /// config
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let source =
            StochasticSource::new(config.demand_rate, config.repair_time, config.random_seed)?;
        Self::with_source(config, Box::new(source))
    }

    /// Runner drawing its delays from `source`. The config is still
    /// validated; its `demand_rate`, `repair_time` and seed are left to the
    /// source.
    pub fn with_source(
        config: SimulationConfig,
        source: Box<dyn RandomSource>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            scheduler: EventScheduler::new(),
            pool: PartsPool::new(config.initial_supply),
            arrivals: ArrivalGenerator::new(config.simulation_time),
            coordinator: RepairCoordinator::new(),
            recorder: MetricsRecorder::new(config.record_interval, config.simulation_time),
            source,
            config,
        })
    }

    /// Drive the scheduler to the horizon and collect the result.
    ///
    /// The arrival generator is started before the recorder, so at equal
    /// timestamps an arrival is visible in that instant's snapshot.
    pub fn run(self) -> Result<SimulationResult, SimError> {
        let Self {
            config,
            mut scheduler,
            mut pool,
            mut arrivals,
            mut coordinator,
            mut recorder,
            mut source,
        } = self;

        debug!(
            "starting run: supply={} rate={} repair={} horizon={} interval={}",
            config.initial_supply,
            config.demand_rate,
            config.repair_time,
            config.simulation_time,
            config.record_interval
        );

        arrivals.start(&mut scheduler, source.as_mut())?;
        recorder.start(&mut scheduler)?;

        scheduler.run_until(config.simulation_time, |s, event| {
            trace!("t={} {}", s.now(), event.kind());
            match event {
                SimEvent::Arrival => {
                    arrivals.on_arrival(s, &mut pool, &mut coordinator, source.as_mut())
                }
                SimEvent::RepairComplete { .. } => {
                    coordinator.on_repair_complete(s, &mut pool, source.as_mut())
                }
                SimEvent::RecordMetrics { tick } => {
                    recorder.on_record(tick, s, &pool, arrivals.total_arrivals(), &coordinator)
                }
            }
        })?;

        let total_arrivals = arrivals.total_arrivals();
        let total_served = coordinator.total_served();
        let final_metrics = FinalMetrics {
            satisfaction_rate: satisfaction_rate(total_served, total_arrivals),
            total_arrivals,
            served: total_served,
            backlog: pool.backlog(),
            available_supply: pool.available(),
            in_repair: coordinator.in_repair(),
        };

        info!(
            "run finished at t={}: {} arrivals, {} served ({:.2}%), backlog {}, {} events",
            scheduler.now(),
            total_arrivals,
            total_served,
            final_metrics.satisfaction_rate * 100.0,
            final_metrics.backlog,
            scheduler.events_executed()
        );

        Ok(SimulationResult {
            snapshots: recorder.into_snapshots(),
            total_arrivals,
            total_served,
            final_metrics,
            wait_stats: coordinator.wait_stats(),
        })
    }
}

/// Run one simulation with the default sampler.
pub fn run(config: &SimulationConfig) -> Result<SimulationResult, SimError> {
    SimulationRunner::new(config.clone())?.run()
}

/// Run one simulation with an injected sampler.
pub fn run_with_source<S>(config: &SimulationConfig, source: S) -> Result<SimulationResult, SimError>
where
    S: RandomSource + 'static,
{
    SimulationRunner::with_source(config.clone(), Box::new(source))?.run()
}
