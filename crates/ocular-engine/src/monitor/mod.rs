//! Physical display discovery.
//!
//! Finds the monitor driving the HMD panel so the runtime can place a
//! fullscreen window on it before the session is set up.

mod matcher;
mod platform;

pub use matcher::{find_matching_monitor, MonitorId, MonitorSource, PRIMARY_MONITOR_INDEX};
pub use platform::WinitMonitors;
