pub mod config;
pub mod flow;
pub mod interface;
pub mod scenario;

pub use interface::{EngineError, RadioEngine};
pub use flow::{FlowRecord, TelemetryExport};

pub use config::ScenarioConfig;
pub use config::{ScenarioOverride, ScenarioPreset};
pub use scenario::{BearerClass, Carrier, CellLayout, Position, QosBearer, Scenario, TrafficApp};
