use crate::builder::{build_scenario, resolve_offered_rate};
use anyhow::{Context, Result};
use nr_lab_abstract::{RadioEngine, ScenarioConfig};
use nr_lab_kpi::{AggregateReport, aggregate};
use tracing::info;

/// What one finished run produced, alongside the demand it was driven
/// with.
#[derive(Debug, Clone)]
pub struct CampaignOutcome {
    /// Per-terminal packet rate handed to the traffic generators.
    pub offered_rate_pps: f64,
    pub flow_count: usize,
    pub report: AggregateReport,
}

/// Drive one run end to end: calibrate demand, deploy the scenario,
/// let the engine run to the configured stop time, then reduce its
/// flow export to KPIs.
pub fn run_campaign<E: RadioEngine>(
    engine: &mut E,
    config: &ScenarioConfig,
) -> Result<CampaignOutcome> {
    let rate = resolve_offered_rate(config).context("Failed to resolve offered demand")?;
    let scenario = build_scenario(config, rate).context("Failed to assemble scenario")?;
    info!(
        "Deploying {} gNB / {} UE at {:.1} packets/s per UE",
        scenario.layout.gnb_positions.len(),
        scenario.layout.ue_positions.len(),
        rate
    );

    engine
        .deploy(&scenario)
        .context("Engine rejected the scenario")?;
    engine
        .run_until(config.sim_time)
        .context("Engine run failed")?;

    let export = engine.export_flow_stats();
    info!("Engine exported telemetry for {} flows", export.len());

    let records = export.into_records();
    let report = aggregate(&records).context("Flow export yielded no aggregate")?;

    Ok(CampaignOutcome {
        offered_rate_pps: rate,
        flow_count: records.len(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nr_lab_abstract::{EngineError, FlowRecord, Scenario, TelemetryExport};
    use std::time::Duration;

    /// Records the calls the driver makes and replays a canned export.
    #[derive(Default)]
    struct StubEngine {
        deployed: Option<Scenario>,
        ran_until: Option<Duration>,
        export: TelemetryExport,
    }

    impl RadioEngine for StubEngine {
        fn deploy(&mut self, scenario: &Scenario) -> Result<(), EngineError> {
            self.deployed = Some(scenario.clone());
            Ok(())
        }

        fn run_until(&mut self, stop: Duration) -> Result<(), EngineError> {
            if self.deployed.is_none() {
                return Err(EngineError::Run("no scenario deployed".into()));
            }
            self.ran_until = Some(stop);
            Ok(())
        }

        fn export_flow_stats(&self) -> TelemetryExport {
            self.export.clone()
        }
    }

    fn canned_export() -> TelemetryExport {
        let mut export = TelemetryExport::default();
        export.flows.insert(
            "1".into(),
            FlowRecord {
                tx_packets: 100,
                rx_packets: 100,
                tx_bytes: 1_000_000,
                rx_bytes: 1_000_000,
                delay_sum: Duration::from_millis(500),
                first_tx: Duration::ZERO,
                last_rx: Duration::from_secs(1),
            },
        );
        export.flows.insert(
            "2".into(),
            FlowRecord {
                tx_packets: 50,
                ..FlowRecord::default()
            },
        );
        export
    }

    #[test]
    fn campaign_drives_engine_and_reduces_its_export() {
        let mut engine = StubEngine {
            export: canned_export(),
            ..StubEngine::default()
        };
        let config = ScenarioConfig::default();

        let outcome = run_campaign(&mut engine, &config).unwrap();

        let deployed = engine.deployed.expect("scenario was deployed");
        assert_eq!(deployed.layout.ue_positions.len(), 6);
        assert_eq!(engine.ran_until, Some(config.sim_time));

        assert_eq!(outcome.flow_count, 2);
        assert_eq!(outcome.report.mean_throughput_mbps().unwrap(), 8.0);
        assert_eq!(outcome.report.mean_delay_ms().unwrap(), 5.0);
        assert_eq!(outcome.report.mean_loss_packets(), 25.0);
    }

    #[test]
    fn empty_engine_export_fails_the_campaign() {
        let mut engine = StubEngine::default();
        let err = run_campaign(&mut engine, &ScenarioConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no aggregate"));
    }
}
