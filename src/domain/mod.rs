// Domain layer - fleet telemetry models and pure analytics
pub mod dashboard;
pub mod efficiency;
pub mod error;
pub mod fleet;
pub mod format;
pub mod metrics;
pub mod telemetry;
pub mod vehicle;
