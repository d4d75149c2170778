use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the engine needs to set a run up: where the nodes are,
/// what spectrum the cell uses, which bearer carries the traffic, and
/// what the traffic generators do.
///
/// Radio internals (scheduling, antennas, channel model) are engine
/// configuration and are not described here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub layout: CellLayout,
    pub carrier: Carrier,
    pub bearer: QosBearer,
    pub traffic: TrafficApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Constant-position site plan. One entry per node, in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLayout {
    pub gnb_positions: Vec<Position>,
    pub ue_positions: Vec<Position>,
}

/// Spectrum assignment for the single operation band: one component
/// carrier occupying the whole band, one bandwidth part per carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub numerology: u16,
    pub central_frequency_hz: f64,
    pub bandwidth_hz: f64,
    pub tx_power_dbm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BearerClass {
    /// Guaranteed-bitrate conversational voice.
    GbrConvVoice,
    /// Best-effort default bearer.
    NonGbrDefault,
}

/// Dedicated bearer carrying the measurement traffic, matched on the
/// destination port of the traffic application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QosBearer {
    pub class: BearerClass,
    pub port: u16,
}

/// Downlink UDP traffic towards every terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficApp {
    pub payload_bytes: u32,
    /// Inter-packet gap per terminal.
    pub interval: Duration,
    pub start: Duration,
    pub stop: Duration,
}
