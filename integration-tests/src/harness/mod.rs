pub mod scenario;
pub mod tracing;

pub use scenario::{GROUP, Scenario};
pub use tracing::{CapturedEvent, EventLog, capture_events};
