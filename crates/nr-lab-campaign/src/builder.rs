use nr_lab_abstract::{
    BearerClass, Carrier, CellLayout, Position, QosBearer, Scenario, ScenarioConfig, TrafficApp,
};
use nr_lab_kpi::calibrate::{CapacityProfile, InvalidProfile};
use std::time::Duration;
use thiserror::Error;

/// Destination port the traffic applications send to; the dedicated
/// bearer's packet filter matches on it.
pub const TRAFFIC_PORT: u16 = 1234;

const GNB_HEIGHT_M: f64 = 10.0;
const UE_HEIGHT_M: f64 = 1.5;

/// Fixed x-axis rake the terminals are placed on, metres from the site.
const UE_X_COORDS_M: [f64; 6] = [10.0, 1000.0, 3000.0, -10.0, -1000.0, -3000.0];

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Calibration(#[from] InvalidProfile),
    #[error("fixed rate must be positive, got {0} packets/s")]
    FixedRate(f64),
    #[error("layout supports up to {max} terminals, requested {requested}")]
    TooManyTerminals { requested: usize, max: usize },
    #[error("at least one gNB is required")]
    NoGnb,
}

/// Per-terminal packet rate for the run: the saturating demand in
/// full-buffer mode, the configured fixed rate otherwise.
pub fn resolve_offered_rate(config: &ScenarioConfig) -> Result<f64, BuildError> {
    if config.full_buffer {
        let profile = CapacityProfile::for_cell(
            config.bandwidth_hz,
            u32::from(config.ue_per_gnb),
            config.payload_bytes,
        );
        Ok(profile.offered_rate()?)
    } else if config.fixed_rate_pps > 0.0 && config.fixed_rate_pps.is_finite() {
        Ok(config.fixed_rate_pps)
    } else {
        Err(BuildError::FixedRate(config.fixed_rate_pps))
    }
}

/// Assemble the engine-facing scenario for `config`, generating
/// traffic at `rate_pps` per terminal.
pub fn build_scenario(config: &ScenarioConfig, rate_pps: f64) -> Result<Scenario, BuildError> {
    if !(rate_pps.is_finite() && rate_pps > 0.0) {
        return Err(BuildError::FixedRate(rate_pps));
    }
    if config.gnb_count == 0 {
        return Err(BuildError::NoGnb);
    }
    let ue_total = usize::from(config.gnb_count) * usize::from(config.ue_per_gnb);
    if ue_total > UE_X_COORDS_M.len() {
        return Err(BuildError::TooManyTerminals {
            requested: ue_total,
            max: UE_X_COORDS_M.len(),
        });
    }

    let layout = CellLayout {
        gnb_positions: (0..config.gnb_count)
            .map(|_| Position { x: 0.0, y: 0.0, z: GNB_HEIGHT_M })
            .collect(),
        ue_positions: UE_X_COORDS_M[..ue_total]
            .iter()
            .map(|&x| Position { x, y: 0.0, z: UE_HEIGHT_M })
            .collect(),
    };

    Ok(Scenario {
        layout,
        carrier: Carrier {
            numerology: config.numerology,
            central_frequency_hz: config.central_frequency_hz,
            bandwidth_hz: config.bandwidth_hz,
            tx_power_dbm: config.tx_power_dbm,
        },
        bearer: QosBearer {
            class: BearerClass::GbrConvVoice,
            port: TRAFFIC_PORT,
        },
        traffic: TrafficApp {
            payload_bytes: config.payload_bytes,
            interval: Duration::from_secs_f64(1.0 / rate_pps),
            start: config.app_start,
            stop: config.sim_time,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_buffer_demand_saturates_the_default_cell() {
        let config = ScenarioConfig::default();
        let rate = resolve_offered_rate(&config).unwrap();
        // 30 Mbit/s shared by 6 UEs, scaled 50/20, over 1500-byte packets.
        assert_eq!(rate, 30e6 / 6.0 * 2.5 / (1500.0 * 8.0));
    }

    #[test]
    fn fixed_rate_bypasses_calibration() {
        let config = ScenarioConfig {
            full_buffer: false,
            fixed_rate_pps: 1000.0,
            // Would be rejected by the calibrator; must not matter here.
            payload_bytes: 0,
            ..ScenarioConfig::default()
        };
        assert_eq!(resolve_offered_rate(&config).unwrap(), 1000.0);
    }

    #[test]
    fn non_positive_fixed_rate_is_rejected() {
        let config = ScenarioConfig {
            full_buffer: false,
            fixed_rate_pps: 0.0,
            ..ScenarioConfig::default()
        };
        assert_eq!(resolve_offered_rate(&config), Err(BuildError::FixedRate(0.0)));
    }

    #[test]
    fn layout_places_nodes_on_the_fixed_rake() {
        let config = ScenarioConfig::default();
        let scenario = build_scenario(&config, 500.0).unwrap();
        assert_eq!(scenario.layout.gnb_positions.len(), 1);
        assert_eq!(scenario.layout.gnb_positions[0].z, 10.0);
        let xs: Vec<f64> = scenario.layout.ue_positions.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 1000.0, 3000.0, -10.0, -1000.0, -3000.0]);
        assert!(scenario.layout.ue_positions.iter().all(|p| p.z == 1.5));
    }

    #[test]
    fn traffic_interval_is_reciprocal_of_rate() {
        let config = ScenarioConfig::default();
        let scenario = build_scenario(&config, 500.0).unwrap();
        assert_eq!(scenario.traffic.interval, Duration::from_millis(2));
        assert_eq!(scenario.traffic.start, config.app_start);
        assert_eq!(scenario.traffic.stop, config.sim_time);
    }

    #[test]
    fn oversubscribed_layout_is_rejected() {
        let config = ScenarioConfig {
            ue_per_gnb: 7,
            ..ScenarioConfig::default()
        };
        assert_eq!(
            build_scenario(&config, 500.0),
            Err(BuildError::TooManyTerminals { requested: 7, max: 6 })
        );
    }
}
