use nr_lab_abstract::FlowRecord;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kpi {
    Throughput,
    Delay,
    Loss,
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kpi::Throughput => write!(f, "throughput"),
            Kpi::Delay => write!(f, "delay"),
            Kpi::Loss => write!(f, "loss"),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmptyAggregate {
    #[error("no flows were observed")]
    NoFlows,
    #[error("no flows eligible for mean {0}")]
    Kpi(Kpi),
}

/// Network-level KPIs reduced from one flow export.
///
/// Each mean carries its own denominator: a flow enters a mean only
/// when that KPI is defined for it, so a flow that never received a
/// packet does not drag throughput or delay toward zero. Accessors
/// surface [`EmptyAggregate`] for a KPI with no eligible flows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    mean_throughput_mbps: Option<f64>,
    mean_delay_ms: Option<f64>,
    mean_loss_packets: f64,
}

impl AggregateReport {
    pub fn mean_throughput_mbps(&self) -> Result<f64, EmptyAggregate> {
        self.mean_throughput_mbps
            .ok_or(EmptyAggregate::Kpi(Kpi::Throughput))
    }

    pub fn mean_delay_ms(&self) -> Result<f64, EmptyAggregate> {
        self.mean_delay_ms.ok_or(EmptyAggregate::Kpi(Kpi::Delay))
    }

    /// Mean lost packets per flow. Defined for every non-empty export,
    /// and fractional whenever losses do not divide evenly.
    pub fn mean_loss_packets(&self) -> f64 {
        self.mean_loss_packets
    }
}

/// Flow throughput in Mbit/s over the receiver-side duration
/// (first transmission to last reception).
///
/// `None` when the flow moved no bytes or its duration is zero.
pub fn throughput_mbps(r: &FlowRecord) -> Option<f64> {
    let duration = r.last_rx.checked_sub(r.first_tx)?;
    if r.rx_bytes == 0 || duration.is_zero() {
        return None;
    }
    Some(r.rx_bytes as f64 * 8.0 / duration.as_secs_f64() / 1e6)
}

/// Mean one-way delay of the flow's received packets, in
/// milliseconds. `None` when nothing was received.
pub fn mean_delay_ms(r: &FlowRecord) -> Option<f64> {
    if r.rx_packets == 0 {
        return None;
    }
    Some(1000.0 * r.delay_sum.as_secs_f64() / r.rx_packets as f64)
}

/// Packets the flow lost in transit. Always defined.
pub fn lost_packets(r: &FlowRecord) -> u64 {
    r.tx_packets.saturating_sub(r.rx_packets)
}

/// Reduce per-flow telemetry to network-level means.
///
/// Pure and deterministic: the same records always produce a
/// bit-identical report. An empty record set fails outright; a flow
/// for which a KPI is undefined is excluded from that mean and that
/// mean alone.
pub fn aggregate(records: &[FlowRecord]) -> Result<AggregateReport, EmptyAggregate> {
    if records.is_empty() {
        return Err(EmptyAggregate::NoFlows);
    }

    let mut throughput_sum = 0.0;
    let mut throughput_flows = 0u64;
    let mut delay_sum = 0.0;
    let mut delay_flows = 0u64;
    let mut lost = 0u64;

    for r in records {
        if let Some(mbps) = throughput_mbps(r) {
            throughput_sum += mbps;
            throughput_flows += 1;
        }
        if let Some(ms) = mean_delay_ms(r) {
            delay_sum += ms;
            delay_flows += 1;
        }
        lost += lost_packets(r);
    }

    Ok(AggregateReport {
        mean_throughput_mbps: (throughput_flows > 0)
            .then(|| throughput_sum / throughput_flows as f64),
        mean_delay_ms: (delay_flows > 0).then(|| delay_sum / delay_flows as f64),
        mean_loss_packets: lost as f64 / records.len() as f64,
    })
}
