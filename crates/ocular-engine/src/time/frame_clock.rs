use std::time::{Duration, Instant};

/// Host-side timing of one rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Device frame index this tick closed.
    pub frame_index: i64,
}

impl FrameTime {
    /// Frame rate implied by `dt`.
    pub fn fps(&self) -> f32 {
        1.0 / self.dt
    }
}

/// Measures the interval between rendered frames.
///
/// Delta time is clamped so a debugger pause or a stalled device does not
/// produce absurd values downstream.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
    last_frame: Option<FrameTime>,
}

impl FrameClock {
    /// Clamps dt to [0.1 ms, 250 ms].
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            dt_min,
            dt_max,
            last_frame: None,
        }
    }

    /// Resets the baseline, e.g. after setup so the first frame does not
    /// include device initialization time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Records the end of `frame_index`.
    pub fn tick(&mut self, frame_index: i64) -> FrameTime {
        self.tick_at(Instant::now(), frame_index)
    }

    fn tick_at(&mut self, now: Instant, frame_index: i64) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index,
        };
        self.last_frame = Some(ft);
        ft
    }

    /// The most recent tick, if any.
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
