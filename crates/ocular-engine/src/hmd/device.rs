use glam::{Quat, Vec3};

use crate::coords::{Eye, EyeViewport, PerEye, Size};

use super::{DistortionCaps, TrackingCaps};

/// Device config-store key for the user's interpupillary distance (metres).
pub const KEY_IPD: &str = "IPD";

/// Device config-store key for the user's standing eye height (metres).
pub const KEY_EYE_HEIGHT: &str = "EyeHeight";

/// Tangents of the four half-angles bounding one eye's field of view.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FovPort {
    pub up_tan: f32,
    pub down_tan: f32,
    pub left_tan: f32,
    pub right_tan: f32,
}

impl FovPort {
    pub const fn new(up_tan: f32, down_tan: f32, left_tan: f32, right_tan: f32) -> Self {
        Self { up_tan, down_tan, left_tan, right_tan }
    }

    /// Symmetric port from horizontal/vertical half-angle tangents.
    pub const fn symmetric(h_tan: f32, v_tan: f32) -> Self {
        Self::new(v_tan, v_tan, h_tan, h_tan)
    }

    /// Horizontal span in tangent units.
    pub fn width_tan(self) -> f32 {
        self.left_tan + self.right_tan
    }

    /// Vertical span in tangent units.
    pub fn height_tan(self) -> f32 {
        self.up_tan + self.down_tan
    }
}

/// Position + orientation sample for one eye at one moment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-eye rendering parameters returned by render configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EyeRenderDesc {
    pub eye: Eye,
    pub fov: FovPort,
    /// View adjustment for this eye in head space (the negated head-to-eye vector).
    pub hmd_to_eye_offset: Vec3,
}

/// 4x4 matrix as the device delivers it: `m[row][col]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowMajorMatrix(pub [[f32; 4]; 4]);

/// Backbuffer the compositor presents into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BackbufferDesc {
    pub size: Size,
    pub multisample: u32,
}

/// Opaque native handle of an eye's color attachment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u64);

/// One eye's submitted image: which texture and which region of it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EyeTexture {
    pub handle: TextureHandle,
    pub texture_size: Size,
    pub viewport: EyeViewport,
}

/// Device frame-timing snapshot, all values in seconds on the device clock.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTiming {
    pub delta_seconds: f32,
    pub this_frame_seconds: f64,
    pub timewarp_point_seconds: f64,
    pub next_frame_seconds: f64,
    pub scanout_midpoint_seconds: f64,
    pub eye_scanout_seconds: PerEye<f64>,
}

/// Head-mounted display driver.
///
/// Tracking, time-warp compositing and frame pacing live behind this trait;
/// the session only orchestrates calls into it. Per-frame queries return
/// `None` when the device has nothing for the requested frame.
pub trait HmdDevice {
    /// Native panel resolution as reported by the device.
    fn resolution(&self) -> Size;

    fn default_eye_fov(&self, eye: Eye) -> FovPort;

    /// Texture size that preserves panel detail for `fov` at `pixel_density`.
    fn fov_texture_size(&self, eye: Eye, fov: FovPort, pixel_density: f32) -> Size;

    /// Starts the tracking sensor. Returns `false` when the device refuses.
    fn configure_tracking(&mut self, supported: TrackingCaps, required: TrackingCaps) -> bool;

    /// Reads a float from the device's per-user config store.
    fn config_float(&self, key: &str, default: f32) -> f32;

    /// Makes the current head yaw and position the new origin.
    fn recenter_pose(&mut self);

    fn configure_rendering(
        &mut self,
        backbuffer: BackbufferDesc,
        caps: DistortionCaps,
        fov: &PerEye<FovPort>,
    ) -> Option<PerEye<EyeRenderDesc>>;

    /// Marks the start of `frame`. May block until the device paces the frame.
    fn begin_frame_timing(&mut self, frame: i64) -> Option<FrameTiming>;

    /// Predicted per-eye poses for `frame`.
    fn eye_poses(&mut self, frame: i64, offsets: &PerEye<Vec3>) -> Option<PerEye<Pose>>;

    /// Order in which eyes should be rendered; the eye the compositor
    /// time-warps last comes last.
    fn eye_render_order(&self) -> [Eye; Eye::COUNT];

    fn perspective_projection(&self, fov: FovPort, near: f32, far: f32) -> RowMajorMatrix;

    /// Hands the rendered eye images and the poses they were drawn with to the compositor.
    fn end_frame(&mut self, poses: &PerEye<Pose>, textures: &PerEye<EyeTexture>);

    /// Releases the device. No further calls are made afterwards.
    fn destroy(&mut self);
}
