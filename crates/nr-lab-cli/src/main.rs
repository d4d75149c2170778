use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use nr_lab_abstract::{ScenarioConfig, ScenarioOverride, ScenarioPreset};
use nr_lab_campaign::{build_scenario, load_telemetry, resolve_offered_rate, write_report, write_scenario};
use nr_lab_kpi::{AggregateReport, EmptyAggregate, aggregate};

#[derive(Parser, Debug)]
#[command(author, version, about = "NR cell saturation lab driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the saturating per-UE demand and assemble the engine scenario.
    Calibrate(CalibrateArgs),
    /// Reduce an engine flow-telemetry export to network KPIs.
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct CalibrateArgs {
    /// Load a scenario preset from disk; flags override its values.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// The numerology to be used.
    #[arg(long)]
    numerology: Option<u16>,

    /// The system frequency in Hz.
    #[arg(long)]
    frequency: Option<f64>,

    /// Carrier bandwidth in Hz.
    #[arg(long)]
    bandwidth: Option<f64>,

    #[arg(long)]
    tx_power: Option<f64>,

    #[arg(long)]
    gnb_count: Option<u16>,

    #[arg(long)]
    ue_per_gnb: Option<u16>,

    #[arg(long)]
    payload_bytes: Option<u32>,

    /// Drive the cell to saturation; when false the fixed rate is used
    /// and calibration is skipped.
    #[arg(long)]
    full_buffer: Option<bool>,

    /// Per-UE packet rate used when full-buffer traffic is off.
    #[arg(long)]
    fixed_rate: Option<f64>,

    /// Total simulation time in seconds.
    #[arg(long)]
    sim_time: Option<f64>,

    /// Traffic application start time in seconds.
    #[arg(long)]
    app_start: Option<f64>,

    /// Write the assembled engine scenario as JSON.
    #[arg(long)]
    scenario_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Engine flow-telemetry export (JSON).
    #[arg(long)]
    telemetry: PathBuf,

    /// Write the KPI report as JSON in addition to the summary.
    #[arg(long)]
    report_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Calibrate(args) => run_calibrate(args),
        Command::Report(args) => run_report(args),
    }
}

fn run_calibrate(args: CalibrateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let rate = resolve_offered_rate(&config)?;
    let scenario = build_scenario(&config, rate)?;

    if config.full_buffer {
        info!("Calibrated saturation demand for {} UEs", config.ue_per_gnb);
    } else {
        info!("Using fixed demand of {} packets/s", rate);
    }

    println!("  Offered rate per UE: {rate:.3} packets/s");
    println!(
        "  Packet interval: {:.6} s",
        scenario.traffic.interval.as_secs_f64()
    );

    if let Some(path) = &args.scenario_out {
        write_scenario(path, &scenario)?;
        info!("Wrote engine scenario to {}", path.display());
    }

    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    let export = load_telemetry(&args.telemetry)?;
    info!(
        "Loaded telemetry for {} flows from {}",
        export.len(),
        args.telemetry.display()
    );

    let records = export.into_records();
    let report = aggregate(&records).context("Telemetry export contains no flows")?;

    print_summary(&report);

    if let Some(path) = &args.report_out {
        write_report(path, &report)?;
        info!("Wrote KPI report to {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &AggregateReport) {
    println!();
    println!(
        "  Mean flow throughput: {}",
        format_kpi(report.mean_throughput_mbps(), "Mbit/s")
    );
    println!(
        "  Mean flow delay: {}",
        format_kpi(report.mean_delay_ms(), "ms")
    );
    println!(
        "  Mean packet loss: {}",
        format_kpi(Ok(report.mean_loss_packets()), "packets")
    );
}

/// A KPI with no eligible flows renders as "no data" rather than
/// failing the whole report.
fn format_kpi(kpi: Result<f64, EmptyAggregate>, unit: &str) -> String {
    match kpi {
        Ok(value) => format!("{value:.4} {unit}"),
        Err(_) => "no data".to_string(),
    }
}

impl CalibrateArgs {
    /// Start from defaults, apply the preset if any, then the flags.
    fn resolve_config(&self) -> Result<ScenarioConfig> {
        let mut config = ScenarioConfig::default();
        if let Some(path) = &self.scenario {
            let preset = load_preset(path)?;
            info!("Using scenario preset: {}", preset.name);
            preset.config.apply_to(&mut config);
        }
        self.as_override().apply_to(&mut config);
        Ok(config)
    }

    fn as_override(&self) -> ScenarioOverride {
        ScenarioOverride {
            numerology: self.numerology,
            central_frequency_hz: self.frequency,
            bandwidth_hz: self.bandwidth,
            tx_power_dbm: self.tx_power,
            gnb_count: self.gnb_count,
            ue_per_gnb: self.ue_per_gnb,
            payload_bytes: self.payload_bytes,
            full_buffer: self.full_buffer,
            fixed_rate_pps: self.fixed_rate,
            sim_time: self.sim_time.map(Duration::from_secs_f64),
            app_start: self.app_start.map(Duration::from_secs_f64),
        }
    }
}

fn load_preset(path: &Path) -> Result<ScenarioPreset> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let preset: ScenarioPreset =
        toml::from_str(&content).context("Failed to parse scenario file")?;
    Ok(preset)
}
