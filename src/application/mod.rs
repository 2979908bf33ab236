// Application layer - Use cases over the fleet domain
pub mod dashboard_service;
pub mod fleet_service;
pub mod telemetry_source;
