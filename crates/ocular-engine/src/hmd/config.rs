use super::{DistortionCaps, TrackingCaps};

/// Interpupillary distance used when the device config store has none (metres).
pub const DEFAULT_IPD: f32 = 0.064;

/// Standing eye height used when the device config store has none (metres).
///
/// The view pipeline also uses this constant to re-level every eye view.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.675;

/// Session configuration.
///
/// Defaults match a seated developer-kit setup: orientation tracking with yaw
/// correction, standard distortion, and near/far planes wide enough that scene
/// content is never clipped at the far end.
#[derive(Debug, Clone)]
pub struct HmdConfig {
    /// Render-target pixel density relative to the panel (1.0 = native).
    pub pixel_density: f32,

    pub near_plane: f32,
    pub far_plane: f32,

    /// Tracking capabilities requested at setup.
    pub tracking: TrackingCaps,

    /// Distortion capabilities requested at render configuration.
    ///
    /// The fullscreen hint is added automatically on transposed panels.
    pub distortion: DistortionCaps,

    pub default_ipd: f32,
    pub default_eye_height: f32,

    /// Overrides platform detection of a transposed (portrait) panel.
    pub transposed_panel: Option<bool>,

    /// Linear RGBA clear color applied to each eye target before drawing.
    pub clear_color: [f64; 4],

    /// Initial head-tracking state.
    pub tracking_enabled: bool,
}

impl Default for HmdConfig {
    fn default() -> Self {
        Self {
            pixel_density: 1.0,
            near_plane: 0.1,
            far_plane: 1_000_000.0,
            tracking: TrackingCaps::ORIENTATION,
            distortion: DistortionCaps::STANDARD,
            default_ipd: DEFAULT_IPD,
            default_eye_height: DEFAULT_EYE_HEIGHT,
            transposed_panel: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            tracking_enabled: true,
        }
    }
}
