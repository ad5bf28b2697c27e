use crate::coords::Size;

use super::{BackbufferDesc, DistortionCaps, HmdConfig};

/// Panel description resolved once at startup.
///
/// Linux developer kits expose the panel in portrait orientation, so width and
/// height arrive swapped. Everything downstream (monitor search, window size,
/// backbuffer) reads the corrected values from here instead of re-checking the
/// platform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayDescriptor {
    /// Resolution exactly as the device reports it.
    pub resolution: Size,
    pub transposed: bool,
}

impl DisplayDescriptor {
    pub const fn new(resolution: Size, transposed: bool) -> Self {
        Self { resolution, transposed }
    }

    /// Resolves the transposed flag from `config`, falling back to the platform.
    pub fn resolve(resolution: Size, config: &HmdConfig) -> Self {
        let transposed = config
            .transposed_panel
            .unwrap_or(cfg!(target_os = "linux"));
        Self::new(resolution, transposed)
    }

    /// Size of the window / video mode the panel is driven at.
    pub fn preferred_size(self) -> Size {
        if self.transposed {
            self.resolution.transposed()
        } else {
            self.resolution
        }
    }

    pub fn preferred_width(self) -> u32 {
        self.preferred_size().width
    }

    pub fn preferred_height(self) -> u32 {
        self.preferred_size().height
    }

    pub fn backbuffer(self) -> BackbufferDesc {
        BackbufferDesc {
            size: self.preferred_size(),
            multisample: 1,
        }
    }

    /// `base` plus the fullscreen hint when the panel is transposed.
    pub fn distortion_caps(self, base: DistortionCaps) -> DistortionCaps {
        base | DistortionCaps::NONE.with_fullscreen_hint(self.transposed)
    }
}
