pub mod aggregate;
pub mod calibrate;

pub use aggregate::{AggregateReport, EmptyAggregate, Kpi, aggregate};
pub use calibrate::{CapacityProfile, InvalidProfile};
