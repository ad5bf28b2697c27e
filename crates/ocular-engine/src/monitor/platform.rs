use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;

use crate::coords::Size;

use super::{MonitorId, MonitorSource};

/// Snapshot of winit's monitor list.
///
/// Ids are assigned 1-based in enumeration order so they stay stable for the
/// lifetime of the snapshot.
pub struct WinitMonitors {
    monitors: Vec<(MonitorId, MonitorHandle)>,
}

impl WinitMonitors {
    pub fn from_handles(handles: impl IntoIterator<Item = MonitorHandle>) -> Self {
        let monitors = handles
            .into_iter()
            .enumerate()
            .map(|(i, h)| (MonitorId(i as u64 + 1), h))
            .collect();
        Self { monitors }
    }

    pub fn from_event_loop(event_loop: &ActiveEventLoop) -> Self {
        Self::from_handles(event_loop.available_monitors())
    }

    /// Returns the winit handle for an id produced by this snapshot.
    pub fn handle(&self, id: MonitorId) -> Option<&MonitorHandle> {
        self.monitors
            .iter()
            .find(|(mid, _)| *mid == id)
            .map(|(_, h)| h)
    }
}

impl MonitorSource for WinitMonitors {
    fn monitors(&self) -> Vec<MonitorId> {
        self.monitors.iter().map(|(id, _)| *id).collect()
    }

    fn video_modes(&self, monitor: MonitorId) -> Vec<Size> {
        let Some(handle) = self.handle(monitor) else {
            return Vec::new();
        };
        handle
            .video_modes()
            .map(|mode| {
                let s = mode.size();
                Size::new(s.width, s.height)
            })
            .collect()
    }
}
