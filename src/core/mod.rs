pub mod arrivals;
pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod metrics;
pub mod parts_pool;
pub mod random_source;
pub mod repair;
pub mod types;
