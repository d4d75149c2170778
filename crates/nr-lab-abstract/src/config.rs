use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Full set of knobs for one saturation run.
///
/// Defaults reproduce the reference deployment: a single gNB at 6 GHz
/// with a 50 MHz carrier, six terminals, and full-buffer UDP downlink
/// traffic of 1500-byte packets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// 3GPP numerology index (mu).
    pub numerology: u16,
    pub central_frequency_hz: f64,
    pub bandwidth_hz: f64,
    pub tx_power_dbm: f64,
    pub gnb_count: u16,
    /// Terminals sharing each cell.
    pub ue_per_gnb: u16,
    /// UDP payload size of the traffic generator.
    pub payload_bytes: u32,
    /// When set, the per-UE demand is calibrated to saturate the cell
    /// and `fixed_rate_pps` is ignored.
    pub full_buffer: bool,
    /// Explicit per-UE packet rate used when `full_buffer` is off.
    pub fixed_rate_pps: f64,
    pub sim_time: Duration,
    /// Traffic applications start this far into the run.
    pub app_start: Duration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            numerology: 0,
            central_frequency_hz: 6e9,
            bandwidth_hz: 50e6,
            tx_power_dbm: 23.0,
            gnb_count: 1,
            ue_per_gnb: 6,
            payload_bytes: 1500,
            full_buffer: true,
            fixed_rate_pps: 1000.0,
            sim_time: Duration::from_secs(5),
            app_start: Duration::from_millis(400),
        }
    }
}

/// A named scenario preset loaded from disk.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioPreset {
    pub name: String,
    pub description: String,
    pub config: ScenarioOverride,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioOverride {
    pub numerology: Option<u16>,
    pub central_frequency_hz: Option<f64>,
    pub bandwidth_hz: Option<f64>,
    pub tx_power_dbm: Option<f64>,
    pub gnb_count: Option<u16>,
    pub ue_per_gnb: Option<u16>,
    pub payload_bytes: Option<u32>,
    pub full_buffer: Option<bool>,
    pub fixed_rate_pps: Option<f64>,
    pub sim_time: Option<Duration>,
    pub app_start: Option<Duration>,
}

impl ScenarioOverride {
    pub fn apply_to(&self, config: &mut ScenarioConfig) {
        if let Some(v) = self.numerology {
            config.numerology = v;
        }
        if let Some(v) = self.central_frequency_hz {
            config.central_frequency_hz = v;
        }
        if let Some(v) = self.bandwidth_hz {
            config.bandwidth_hz = v;
        }
        if let Some(v) = self.tx_power_dbm {
            config.tx_power_dbm = v;
        }
        if let Some(v) = self.gnb_count {
            config.gnb_count = v;
        }
        if let Some(v) = self.ue_per_gnb {
            config.ue_per_gnb = v;
        }
        if let Some(v) = self.payload_bytes {
            config.payload_bytes = v;
        }
        if let Some(v) = self.full_buffer {
            config.full_buffer = v;
        }
        if let Some(v) = self.fixed_rate_pps {
            config.fixed_rate_pps = v;
        }
        if let Some(v) = self.sim_time {
            config.sim_time = v;
        }
        if let Some(v) = self.app_start {
            config.app_start = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = ScenarioConfig::default();
        assert_eq!(config.numerology, 0);
        assert_eq!(config.central_frequency_hz, 6e9);
        assert_eq!(config.bandwidth_hz, 50e6);
        assert_eq!(config.ue_per_gnb, 6);
        assert_eq!(config.payload_bytes, 1500);
        assert!(config.full_buffer);
        assert_eq!(config.sim_time, Duration::from_secs(5));
        assert_eq!(config.app_start, Duration::from_millis(400));
    }

    #[test]
    fn preset_parses_and_applies() {
        let preset: ScenarioPreset = toml::from_str(
            r#"
            name = "wide-band"
            description = "100 MHz carrier"

            [config]
            bandwidth_hz = 100e6
            sim_time = { secs = 10, nanos = 0 }
            "#,
        )
        .unwrap();
        assert_eq!(preset.name, "wide-band");

        let mut config = ScenarioConfig::default();
        preset.config.apply_to(&mut config);
        assert_eq!(config.bandwidth_hz, 100e6);
        assert_eq!(config.sim_time, Duration::from_secs(10));
        assert!(config.full_buffer);
    }

    #[test]
    fn override_only_touches_set_fields() {
        let mut config = ScenarioConfig::default();
        let ov = ScenarioOverride {
            bandwidth_hz: Some(100e6),
            ue_per_gnb: Some(3),
            ..Default::default()
        };
        ov.apply_to(&mut config);
        assert_eq!(config.bandwidth_hz, 100e6);
        assert_eq!(config.ue_per_gnb, 3);
        // Untouched fields keep their defaults.
        assert_eq!(config.numerology, 0);
        assert_eq!(config.payload_bytes, 1500);
    }
}
