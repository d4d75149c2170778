use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Telemetry counters for one unidirectional flow, as reported by the
/// engine after a run.
///
/// Timestamps are offsets from simulation start. A flow that never
/// received a packet has `rx_packets == 0` and meaningless `last_rx`;
/// consumers must not derive per-packet delay or duration from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    /// Sum of one-way delays over all received packets.
    pub delay_sum: Duration,
    /// Time the first packet of the flow left the sender.
    pub first_tx: Duration,
    /// Time the last packet of the flow reached the receiver.
    pub last_rx: Duration,
}

/// Post-run flow export, keyed by the engine's opaque flow identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryExport {
    pub flows: BTreeMap<String, FlowRecord>,
}

impl TelemetryExport {
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Drop the flow identifiers; aggregation only needs the counters.
    pub fn into_records(self) -> Vec<FlowRecord> {
        self.flows.into_values().collect()
    }
}
