use crate::flow::TelemetryExport;
use crate::scenario::Scenario;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scenario setup failed: {0}")]
    Setup(String),
    #[error("simulation run failed: {0}")]
    Run(String),
}

/// The seam to the discrete-event radio engine.
///
/// The engine owns channel modeling, scheduling, mobility, and packet
/// delivery. This crate only describes runs to it and reads flow
/// telemetry back; implementations typically wrap an out-of-process
/// simulator.
pub trait RadioEngine {
    /// Materialize the scenario: create nodes, attach devices, assign
    /// the bearer, install traffic applications.
    fn deploy(&mut self, scenario: &Scenario) -> Result<(), EngineError>;

    /// Advance simulated time to `stop` and drain the event queue.
    fn run_until(&mut self, stop: Duration) -> Result<(), EngineError>;

    /// Per-flow counters observed during the run.
    fn export_flow_stats(&self) -> TelemetryExport;
}
