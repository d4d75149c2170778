pub mod builder;
pub mod campaign;
pub mod telemetry;

pub use builder::{BuildError, TRAFFIC_PORT, build_scenario, resolve_offered_rate};
pub use campaign::{CampaignOutcome, run_campaign};
pub use telemetry::{load_telemetry, write_report, write_scenario};
