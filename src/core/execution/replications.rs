use crate::core::errors::SimError;
use crate::core::execution::config::{ConcurrencyMode, ReplicationPlan, SimulationConfig};
use crate::core::execution::simulation_engine::run;
use crate::core::metrics::SimulationResult;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One seeded run of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replication {
    pub seed: u64,
    pub result: SimulationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    /// In the plan's seed order, whatever the concurrency mode
    pub replications: Vec<Replication>,
    pub mean_satisfaction: Option<f64>,
    pub min_satisfaction: Option<f64>,
    pub mean_final_backlog: Option<f64>,
}

impl ReplicationSummary {
    fn from_replications(replications: Vec<Replication>) -> Self {
        let n = replications.len() as f64;
        let (mean_satisfaction, min_satisfaction, mean_final_backlog) = if replications.is_empty() {
            (None, None, None)
        } else {
            let rates = replications.iter().map(|r| r.result.satisfaction_rate());
            let mean = rates.clone().sum::<f64>() / n;
            let min = rates.fold(f64::INFINITY, f64::min);
            let backlog = replications
                .iter()
                .map(|r| r.result.final_metrics.backlog as f64)
                .sum::<f64>()
                / n;
            (Some(mean), Some(min), Some(backlog))
        };

        Self {
            replications,
            mean_satisfaction,
            min_satisfaction,
            mean_final_backlog,
        }
    }
}

/// Run `config` once per seed in `plan`.
///
/// The config's own `random_seed` is overridden by each plan seed. Runs share
/// no state, so the Rayon mode yields exactly the sequential results.
pub fn run_replications(
    config: &SimulationConfig,
    plan: &ReplicationPlan,
) -> Result<ReplicationSummary, SimError> {
    config.validate()?;

    let run_seed = |seed: &u64| -> Result<Replication, SimError> {
        let seeded = config.clone().with_seed(*seed);
        Ok(Replication {
            seed: *seed,
            result: run(&seeded)?,
        })
    };

    let replications = match plan.concurrency_mode {
        ConcurrencyMode::Sequential => plan
            .seeds
            .iter()
            .map(run_seed)
            .collect::<Result<Vec<_>, _>>()?,
        ConcurrencyMode::Rayon => match plan.thread_pool_size {
            Some(size) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(size)
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?;
                pool.install(|| {
                    plan.seeds
                        .par_iter()
                        .map(run_seed)
                        .collect::<Result<Vec<_>, _>>()
                })?
            }
            None => plan
                .seeds
                .par_iter()
                .map(run_seed)
                .collect::<Result<Vec<_>, _>>()?,
        },
    };

    let summary = ReplicationSummary::from_replications(replications);
    info!(
        "{} replications ({:?}), mean satisfaction {:?}",
        summary.replications.len(),
        plan.concurrency_mode,
        summary.mean_satisfaction
    );

    Ok(summary)
}
