use std::collections::HashMap;
use std::time::{Duration, Instant};

use glam::{Quat, Vec3};

use crate::coords::{Eye, PerEye, Size};

use super::{
    BackbufferDesc, DistortionCaps, EyeRenderDesc, EyeTexture, FovPort, FrameTiming, HmdDevice,
    Pose, RowMajorMatrix, TrackingCaps,
};

/// Parameters of the simulated headset.
#[derive(Debug, Clone)]
pub struct SimulatedHmdConfig {
    pub resolution: Size,
    /// Left-eye FOV; the right eye mirrors it horizontally.
    pub left_fov: FovPort,
    /// Render-target pixels per unit of FOV tangent at density 1.0.
    pub pixels_per_tan: f32,
    pub refresh_hz: f64,
    pub render_order: [Eye; Eye::COUNT],
    /// Sleep in `begin_frame_timing` to hold the refresh rate.
    pub pace_frames: bool,
    /// Peak head yaw of the scripted sweep, radians.
    pub yaw_amplitude: f32,
}

impl Default for SimulatedHmdConfig {
    /// A DK2-like panel.
    fn default() -> Self {
        Self {
            resolution: Size::new(1920, 1080),
            left_fov: FovPort::new(1.3292, 1.3292, 1.0586, 1.0924),
            pixels_per_tan: 549.5,
            refresh_hz: 75.0,
            render_order: [Eye::Right, Eye::Left],
            pace_frames: true,
            yaw_amplitude: 0.6,
        }
    }
}

/// Software stand-in for a headset.
///
/// Head motion is a scripted yaw sweep driven by the frame index, so runs are
/// reproducible. Submitted frames are counted but not displayed; the windowed
/// runtime mirrors the eye targets itself.
pub struct SimulatedHmd {
    config: SimulatedHmdConfig,
    store: HashMap<String, f32>,
    tracking: Option<TrackingCaps>,
    rendering: Option<(BackbufferDesc, DistortionCaps)>,
    yaw_origin: f32,
    last_yaw: f32,
    started: Instant,
    next_deadline: Option<Instant>,
    frames_submitted: u64,
    last_textures: Option<PerEye<EyeTexture>>,
    destroyed: bool,
}

impl SimulatedHmd {
    pub fn new(config: SimulatedHmdConfig) -> Self {
        Self {
            config,
            store: HashMap::new(),
            tracking: None,
            rendering: None,
            yaw_origin: 0.0,
            last_yaw: 0.0,
            started: Instant::now(),
            next_deadline: None,
            frames_submitted: 0,
            last_textures: None,
            destroyed: false,
        }
    }

    /// Sets a value in the per-user config store.
    pub fn set_config_value(&mut self, key: impl Into<String>, value: f32) {
        self.store.insert(key.into(), value);
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn last_submitted(&self) -> Option<&PerEye<EyeTexture>> {
        self.last_textures.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn frame_seconds(&self, frame: i64) -> f64 {
        frame.max(0) as f64 / self.config.refresh_hz
    }

    fn head_yaw(&self, frame: i64) -> f32 {
        let t = self.frame_seconds(frame) as f32;
        (t * 0.5).sin() * self.config.yaw_amplitude
    }

    fn pace(&mut self) {
        let period = Duration::from_secs_f64(1.0 / self.config.refresh_hz);
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Drop missed deadlines rather than bursting to catch up.
        self.next_deadline = Some(deadline.max(now) + period);
    }
}

impl Default for SimulatedHmd {
    fn default() -> Self {
        Self::new(SimulatedHmdConfig::default())
    }
}

impl HmdDevice for SimulatedHmd {
    fn resolution(&self) -> Size {
        self.config.resolution
    }

    fn default_eye_fov(&self, eye: Eye) -> FovPort {
        let f = self.config.left_fov;
        match eye {
            Eye::Left => f,
            Eye::Right => FovPort::new(f.up_tan, f.down_tan, f.right_tan, f.left_tan),
        }
    }

    fn fov_texture_size(&self, _eye: Eye, fov: FovPort, pixel_density: f32) -> Size {
        let scale = self.config.pixels_per_tan * pixel_density;
        Size::new(
            (fov.width_tan() * scale).ceil() as u32,
            (fov.height_tan() * scale).ceil() as u32,
        )
    }

    fn configure_tracking(&mut self, supported: TrackingCaps, required: TrackingCaps) -> bool {
        // Only rotational tracking is simulated.
        if required.position {
            return false;
        }
        self.tracking = Some(supported);
        true
    }

    fn config_float(&self, key: &str, default: f32) -> f32 {
        self.store.get(key).copied().unwrap_or(default)
    }

    fn recenter_pose(&mut self) {
        self.yaw_origin = self.last_yaw;
        log::debug!("simulated hmd recentered at yaw {:.3}", self.yaw_origin);
    }

    fn configure_rendering(
        &mut self,
        backbuffer: BackbufferDesc,
        caps: DistortionCaps,
        fov: &PerEye<FovPort>,
    ) -> Option<PerEye<EyeRenderDesc>> {
        if backbuffer.size.is_empty() {
            return None;
        }
        self.rendering = Some((backbuffer, caps));
        let half_ipd = super::DEFAULT_IPD * 0.5;
        Some(PerEye::from_fn(|eye| EyeRenderDesc {
            eye,
            fov: fov[eye],
            hmd_to_eye_offset: match eye {
                Eye::Left => Vec3::new(half_ipd, 0.0, 0.0),
                Eye::Right => Vec3::new(-half_ipd, 0.0, 0.0),
            },
        }))
    }

    fn begin_frame_timing(&mut self, frame: i64) -> Option<FrameTiming> {
        if self.rendering.is_none() {
            return None;
        }
        if self.config.pace_frames {
            self.pace();
        }

        let period = 1.0 / self.config.refresh_hz;
        let this_frame = self.frame_seconds(frame);
        let midpoint = this_frame + period * 0.5;
        Some(FrameTiming {
            delta_seconds: period as f32,
            this_frame_seconds: this_frame,
            timewarp_point_seconds: this_frame + period * 0.8,
            next_frame_seconds: this_frame + period,
            scanout_midpoint_seconds: midpoint,
            eye_scanout_seconds: PerEye::new(midpoint - period * 0.25, midpoint + period * 0.25),
        })
    }

    fn eye_poses(&mut self, frame: i64, offsets: &PerEye<Vec3>) -> Option<PerEye<Pose>> {
        let tracking = self.tracking?;
        if !tracking.orientation {
            return Some(PerEye::new(Pose::IDENTITY, Pose::IDENTITY));
        }

        self.last_yaw = self.head_yaw(frame);
        let pitch = (self.frame_seconds(frame) as f32 * 0.3).sin() * 0.1;
        let orientation =
            Quat::from_rotation_y(self.last_yaw - self.yaw_origin) * Quat::from_rotation_x(pitch);

        // Offsets are view adjustments, so each eye sits at the negated offset.
        Some(PerEye::from_fn(|eye| {
            Pose::new(orientation * -offsets[eye], orientation)
        }))
    }

    fn eye_render_order(&self) -> [Eye; Eye::COUNT] {
        self.config.render_order
    }

    fn perspective_projection(&self, fov: FovPort, near: f32, far: f32) -> RowMajorMatrix {
        let x_scale = 2.0 / fov.width_tan();
        let x_offset = (fov.left_tan - fov.right_tan) * x_scale * 0.5;
        let y_scale = 2.0 / fov.height_tan();
        let y_offset = (fov.up_tan - fov.down_tan) * y_scale * 0.5;

        // Right-handed, depth in [0, 1].
        let mut m = [[0.0f32; 4]; 4];
        m[0][0] = x_scale;
        m[0][2] = -x_offset;
        m[1][1] = y_scale;
        m[1][2] = y_offset;
        m[2][2] = far / (near - far);
        m[2][3] = (far * near) / (near - far);
        m[3][2] = -1.0;
        RowMajorMatrix(m)
    }

    fn end_frame(&mut self, _poses: &PerEye<Pose>, textures: &PerEye<EyeTexture>) {
        self.frames_submitted += 1;
        self.last_textures = Some(*textures);
        log::trace!(
            "simulated hmd frame {} submitted ({:?}, {:?}) after {:.2}s",
            self.frames_submitted,
            textures.left.handle,
            textures.right.handle,
            self.started.elapsed().as_secs_f32(),
        );
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.rendering = None;
        self.tracking = None;
        log::debug!("simulated hmd destroyed after {} frames", self.frames_submitted);
    }
}
