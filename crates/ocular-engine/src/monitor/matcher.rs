use crate::coords::Size;

/// Opaque monitor identifier assigned by a [`MonitorSource`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MonitorId(pub u64);

/// Enumeration index treated as authoritative when it matches.
pub const PRIMARY_MONITOR_INDEX: usize = 0;

/// Windowing-toolkit view of connected monitors.
pub trait MonitorSource {
    /// Connected monitors in enumeration order.
    fn monitors(&self) -> Vec<MonitorId>;

    /// Video mode sizes supported by `monitor`.
    fn video_modes(&self, monitor: MonitorId) -> Vec<Size>;
}

/// Finds the monitor that can drive a `width` x `height` panel.
///
/// A match on the first enumerated monitor wins immediately. Otherwise every
/// monitor is scanned and the last one with a matching mode is returned.
/// `None` means no monitor offers the mode.
pub fn find_matching_monitor<M>(source: &M, width: u32, height: u32) -> Option<MonitorId>
where
    M: MonitorSource + ?Sized,
{
    let target = Size::new(width, height);
    let mut found = None;

    for (index, monitor) in source.monitors().into_iter().enumerate() {
        let modes = source.video_modes(monitor);
        log::debug!("monitor {:?}: {} modes", monitor, modes.len());

        if modes.contains(&target) {
            log::debug!("found dimensions match: {width}x{height} on {monitor:?}");
            found = Some(monitor);
            if index == PRIMARY_MONITOR_INDEX {
                return found;
            }
        }
    }

    found
}
