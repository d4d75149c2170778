use anyhow::{Context, Result};
use nr_lab_abstract::{Scenario, TelemetryExport};
use nr_lab_kpi::AggregateReport;
use std::fs;
use std::path::Path;

/// Read an engine flow export from a JSON file.
pub fn load_telemetry(path: &Path) -> Result<TelemetryExport> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read telemetry file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse telemetry file {}", path.display()))
}

/// Write the assembled scenario as JSON for an out-of-process engine.
pub fn write_scenario(path: &Path, scenario: &Scenario) -> Result<()> {
    let data = serde_json::to_vec_pretty(scenario).context("Failed to serialize scenario")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write scenario file {}", path.display()))?;
    Ok(())
}

/// Write the KPI report as JSON.
pub fn write_report(path: &Path, report: &AggregateReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize report")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;
    Ok(())
}
