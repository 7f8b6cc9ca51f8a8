use sparesim::{run, run_replications, ConcurrencyMode, ReplicationPlan, SimError, SimulationConfig};

fn main() -> Result<(), SimError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🔧 Repairable Spares Simulation 🔧");

    let config = SimulationConfig::new().with_seed(42);
    let result = run(&config)?;
    let metrics = &result.final_metrics;

    println!("\n=== Final Simulation Metrics ===");
    println!("Total Vehicle Arrivals: {}", metrics.total_arrivals);
    println!("Vehicles Served (Demand Satisfied): {}", metrics.served);
    println!("Demand Satisfaction Rate: {:.2}%", metrics.satisfaction_rate * 100.0);
    println!("Demand Backlog Queue: {}", metrics.backlog);
    println!("Available Supply: {}", metrics.available_supply);
    println!("Units in Repair Cycle: {}", metrics.in_repair);
    println!(
        "Mean Wait for Part: {:.3} (max {:.3}, {} of {} vehicles queued)",
        result.wait_stats.mean_wait,
        result.wait_stats.max_wait,
        result.wait_stats.queued,
        result.wait_stats.served
    );

    println!("\n=== Time Series (every 10th sample) ===");
    println!("{:>8} {:>10} {:>8} {:>10} {:>12}", "time", "available", "backlog", "in_repair", "satisfaction");
    for (time, available, backlog, in_repair, rate) in result.series().into_iter().step_by(10) {
        println!("{:>8.1} {:>10} {:>8} {:>10} {:>12.3}", time, available, backlog, in_repair, rate);
    }

    let plan = ReplicationPlan::new(0..32).with_concurrency(ConcurrencyMode::Rayon);
    let summary = run_replications(&config, &plan)?;
    println!("\n=== {} Replications ===", summary.replications.len());
    if let (Some(mean), Some(min)) = (summary.mean_satisfaction, summary.min_satisfaction) {
        println!("Mean Satisfaction Rate: {:.2}%", mean * 100.0);
        println!("Worst Satisfaction Rate: {:.2}%", min * 100.0);
    }
    if let Some(backlog) = summary.mean_final_backlog {
        println!("Mean Final Backlog: {:.2}", backlog);
    }

    Ok(())
}
