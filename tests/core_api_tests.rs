use sparesim::core::parts_pool::PartsPool;
use sparesim::core::types::{PendingRequest, Vehicle, VehicleId};
use sparesim::{
    run, run_replications, run_with_source, ConcurrencyMode, ReplicationPlan, ScriptedSource,
    SimError, SimulationConfig, SimulationResult,
};

fn configs() -> Vec<SimulationConfig> {
    vec![
        SimulationConfig::new().with_seed(1),
        SimulationConfig::new()
            .with_initial_supply(1)
            .with_demand_rate(2.0)
            .with_repair_time(4.0)
            .with_simulation_time(60.0)
            .with_seed(2),
        SimulationConfig::new()
            .with_initial_supply(25)
            .with_demand_rate(0.3)
            .with_repair_time(1.5)
            .with_simulation_time(200.0)
            .with_record_interval(2.5)
            .with_seed(3),
        SimulationConfig::new()
            .with_initial_supply(3)
            .with_demand_rate(5.0)
            .with_repair_time(0.7)
            .with_simulation_time(10.0)
            .with_record_interval(0.1)
            .with_seed(4),
    ]
}

fn bits(result: &SimulationResult) -> Vec<(u64, usize, usize, usize, u64)> {
    result
        .series()
        .into_iter()
        .map(|(t, a, b, r, s)| (t.to_bits(), a, b, r, s.to_bits()))
        .collect()
}

#[test]
fn test_conservation_holds_at_every_snapshot() {
    for config in configs() {
        let result = run(&config).unwrap();
        assert!(!result.snapshots.is_empty());
        for s in &result.snapshots {
            assert_eq!(
                s.available + s.in_repair_count,
                config.initial_supply,
                "conservation broken at t={}",
                s.time
            );
        }
    }
}

#[test]
fn test_snapshot_bounds() {
    for config in configs() {
        let result = run(&config).unwrap();
        for s in &result.snapshots {
            assert!(s.available <= config.initial_supply);
            assert!((0.0..=1.0).contains(&s.satisfaction_rate));
            assert!(s.total_served <= s.total_arrivals);
            if s.backlog_length > 0 {
                assert_eq!(s.available, 0, "vehicles queued while parts sat on the shelf");
            }
        }
    }
}

#[test]
fn test_snapshots_are_time_ordered_and_cumulative() {
    for config in configs() {
        let result = run(&config).unwrap();
        for pair in result.snapshots.windows(2) {
            assert!(pair[0].time < pair[1].time);
            assert!(pair[0].total_arrivals <= pair[1].total_arrivals);
            assert!(pair[0].total_served <= pair[1].total_served);
        }
        assert_eq!(result.snapshots[0].time, 0.0);
        assert!(result.snapshots.last().unwrap().time <= config.simulation_time);
    }
}

#[test]
fn test_same_seed_same_output() {
    for config in configs() {
        let first = run(&config).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }
}

#[test]
fn test_different_seeds_differ() {
    let base = SimulationConfig::new().with_simulation_time(200.0);
    let a = run(&base.clone().with_seed(100)).unwrap();
    let b = run(&base.with_seed(101)).unwrap();
    assert_ne!(bits(&a), bits(&b));
}

#[test]
fn test_final_metrics_match_totals() {
    for config in configs() {
        let result = run(&config).unwrap();
        let f = &result.final_metrics;
        assert_eq!(f.total_arrivals, result.total_arrivals);
        assert_eq!(f.served, result.total_served);
        assert_eq!(f.available_supply + f.in_repair, config.initial_supply);
        // every arrival is either served or still queued
        assert_eq!(result.total_arrivals, result.total_served + f.backlog as u64);
        assert_eq!(result.wait_stats.served, result.total_served);
    }
}

#[test]
fn test_zero_demand() {
    let config = SimulationConfig::new()
        .with_initial_supply(6)
        .with_simulation_time(30.0)
        .with_record_interval(3.0);
    let result = run_with_source(&config, ScriptedSource::no_arrivals(5.0)).unwrap();

    assert_eq!(result.snapshots.len(), 11);
    for s in &result.snapshots {
        assert_eq!(s.available, 6);
        assert_eq!(s.backlog_length, 0);
        assert_eq!(s.in_repair_count, 0);
        assert_eq!(s.satisfaction_rate, 1.0);
    }
    assert_eq!(result.total_arrivals, 0);
    assert_eq!(result.final_metrics.satisfaction_rate, 1.0);
}

#[test]
fn test_series_shape() {
    let config = SimulationConfig::new()
        .with_initial_supply(1)
        .with_repair_time(3.0)
        .with_simulation_time(10.0);
    let result = run_with_source(&config, ScriptedSource::periodic_from_zero(1.0, 3.0)).unwrap();

    let series = result.series();
    assert_eq!(series.len(), result.snapshots.len());
    assert_eq!(series[2], (2.0, 0, 2, 1, 1.0 / 3.0));
}

#[test]
fn test_fifo_service_order() {
    let mut pool = PartsPool::new(2);
    assert!(pool.try_take());
    assert!(pool.try_take());

    let vehicles: Vec<Vehicle> = (0..5)
        .map(|i| Vehicle::new(VehicleId::new(i), i as f64))
        .collect();
    for v in &vehicles {
        pool.enqueue_waiter(PendingRequest::new(*v));
    }

    let mut served = Vec::new();
    for t in 10..15 {
        for request in pool.release(t as f64).unwrap() {
            served.push(request.vehicle.id);
        }
    }

    let expected: Vec<_> = vehicles.iter().map(|v| v.id).collect();
    assert_eq!(served, expected);
}

#[test]
fn test_bad_config_is_reported() {
    let cases = [
        SimulationConfig::new().with_initial_supply(0),
        SimulationConfig::new().with_demand_rate(-0.5),
        SimulationConfig::new().with_repair_time(0.0),
        SimulationConfig::new().with_simulation_time(0.0),
        SimulationConfig::new().with_record_interval(-1.0),
        SimulationConfig::new().with_simulation_time(10.0).with_record_interval(11.0),
    ];
    for config in cases {
        assert!(matches!(run(&config), Err(SimError::Config(_))), "{:?}", config);
    }
}

#[test]
fn test_parallel_replications_match_single_runs() {
    let config = SimulationConfig::new()
        .with_initial_supply(2)
        .with_demand_rate(0.9)
        .with_repair_time(2.0)
        .with_simulation_time(40.0);
    let plan = ReplicationPlan::new([5, 6, 7, 8]).with_concurrency(ConcurrencyMode::Rayon);
    let summary = run_replications(&config, &plan).unwrap();

    for replication in &summary.replications {
        let single = run(&config.clone().with_seed(replication.seed)).unwrap();
        assert_eq!(replication.result, single);
    }
}
