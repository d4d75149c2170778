use std::time::Duration;
use thiserror::Error;

/// Aggregate bit-rate that saturates one cell at the reference
/// bandwidth, with the link adaptation the reference deployment uses.
pub const BASELINE_RATE_BPS: f64 = 30e6;

/// Bandwidth at which [`BASELINE_RATE_BPS`] holds.
pub const REFERENCE_BANDWIDTH_HZ: f64 = 20e6;

/// Cell capacity assumptions from which the saturating per-terminal
/// demand is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityProfile {
    /// Saturating cell rate at `reference_bandwidth_hz`, bit/s.
    pub baseline_rate_bps: f64,
    pub reference_bandwidth_hz: f64,
    /// Configured carrier bandwidth, Hz.
    pub bandwidth_hz: f64,
    /// Terminals sharing the cell.
    pub terminals: u32,
    /// Application payload size, bytes.
    pub payload_bytes: u32,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidProfile {
    #[error("cell must serve at least one terminal")]
    NoTerminals,
    #[error("bandwidth must be positive, got {0} Hz")]
    Bandwidth(f64),
    #[error("baseline cell rate must be positive, got {0} bit/s")]
    BaselineRate(f64),
    #[error("payload size must be positive")]
    Payload,
}

impl CapacityProfile {
    /// Profile for a cell of the baseline capacity model.
    pub fn for_cell(bandwidth_hz: f64, terminals: u32, payload_bytes: u32) -> Self {
        Self {
            baseline_rate_bps: BASELINE_RATE_BPS,
            reference_bandwidth_hz: REFERENCE_BANDWIDTH_HZ,
            bandwidth_hz,
            terminals,
            payload_bytes,
        }
    }

    fn validate(&self) -> Result<(), InvalidProfile> {
        if self.terminals == 0 {
            return Err(InvalidProfile::NoTerminals);
        }
        for hz in [self.bandwidth_hz, self.reference_bandwidth_hz] {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(InvalidProfile::Bandwidth(hz));
            }
        }
        if !(self.baseline_rate_bps.is_finite() && self.baseline_rate_bps > 0.0) {
            return Err(InvalidProfile::BaselineRate(self.baseline_rate_bps));
        }
        if self.payload_bytes == 0 {
            return Err(InvalidProfile::Payload);
        }
        Ok(())
    }

    /// Per-terminal packet rate (packets/s) that keeps the shared
    /// channel saturated.
    ///
    /// The cell's saturating bit-rate is split evenly across the
    /// terminals and scaled up linearly when the configured bandwidth
    /// exceeds the reference; the model does not extrapolate
    /// saturation downward. The result is strictly positive.
    pub fn offered_rate(&self) -> Result<f64, InvalidProfile> {
        self.validate()?;
        let mut bit_rate = self.baseline_rate_bps / f64::from(self.terminals);
        if self.bandwidth_hz > self.reference_bandwidth_hz {
            bit_rate *= self.bandwidth_hz / self.reference_bandwidth_hz;
        }
        Ok(bit_rate / (f64::from(self.payload_bytes) * 8.0))
    }

    /// Inter-packet gap for the traffic generator, `1 / offered_rate`.
    pub fn packet_interval(&self) -> Result<Duration, InvalidProfile> {
        Ok(Duration::from_secs_f64(1.0 / self.offered_rate()?))
    }
}
