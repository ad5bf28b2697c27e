use std::ops::BitOr;

/// Head-tracking capabilities requested from the device.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TrackingCaps {
    pub orientation: bool,
    pub mag_yaw_correction: bool,
    pub position: bool,
}

impl TrackingCaps {
    pub const NONE: Self = Self {
        orientation: false,
        mag_yaw_correction: false,
        position: false,
    };

    /// Orientation with magnetometer yaw-drift correction; no positional tracking.
    pub const ORIENTATION: Self = Self {
        orientation: true,
        mag_yaw_correction: true,
        position: false,
    };

    pub const fn with_position(mut self, position: bool) -> Self {
        self.position = position;
        self
    }

    /// Wire representation for drivers that take a flag word.
    pub const fn bits(self) -> u32 {
        (self.orientation as u32) << 4
            | (self.mag_yaw_correction as u32) << 5
            | (self.position as u32) << 6
    }

    pub const fn is_empty(self) -> bool {
        self.bits() == 0
    }
}

impl BitOr for TrackingCaps {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            orientation: self.orientation || rhs.orientation,
            mag_yaw_correction: self.mag_yaw_correction || rhs.mag_yaw_correction,
            position: self.position || rhs.position,
        }
    }
}

/// Compositor post-processing features enabled at render configuration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DistortionCaps {
    pub chromatic: bool,
    pub time_warp: bool,
    pub vignette: bool,
    /// Let the compositor drive a fullscreen window on a transposed panel.
    pub fullscreen_hint: bool,
}

impl DistortionCaps {
    pub const NONE: Self = Self {
        chromatic: false,
        time_warp: false,
        vignette: false,
        fullscreen_hint: false,
    };

    /// Chromatic aberration correction, time-warp and vignette.
    pub const STANDARD: Self = Self {
        chromatic: true,
        time_warp: true,
        vignette: true,
        fullscreen_hint: false,
    };

    pub const fn with_fullscreen_hint(mut self, hint: bool) -> Self {
        self.fullscreen_hint = hint;
        self
    }

    pub const fn bits(self) -> u32 {
        (self.chromatic as u32)
            | (self.time_warp as u32) << 1
            | (self.vignette as u32) << 3
            | (self.fullscreen_hint as u32) << 9
    }
}

impl BitOr for DistortionCaps {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            chromatic: self.chromatic || rhs.chromatic,
            time_warp: self.time_warp || rhs.time_warp,
            vignette: self.vignette || rhs.vignette,
            fullscreen_hint: self.fullscreen_hint || rhs.fullscreen_hint,
        }
    }
}
