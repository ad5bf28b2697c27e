//! Recording collaborators shared by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::{Mat4, Quat, Vec3};

use crate::coords::{Eye, EyeViewport, PerEye, Size};
use crate::hmd::{
    BackbufferDesc, DistortionCaps, EyeRenderDesc, EyeTexture, FovPort, FrameTiming, HmdDevice,
    HmdError, Pose, RowMajorMatrix, TextureHandle, TrackingCaps,
};
use crate::render::{RenderBackend, SceneRenderer, TargetDesc};

/// Cross-collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BeginFrame(i64),
    EyePoses(i64),
    Viewport(EyeViewport),
    Bind(Eye),
    Clear,
    UpdateMatrix,
    Draw(Eye),
    Unbind,
    RestoreDefaults,
    EndFrame,
    CreateTarget(Eye),
    DestroyTarget(Eye),
    SceneSetup,
    SceneDestroy,
    DeviceDestroy,
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

// ── device ────────────────────────────────────────────────────────────────

pub struct MockDevice {
    pub journal: Journal,
    pub resolution: Size,
    pub fov: PerEye<FovPort>,
    pub recommended: PerEye<Size>,
    pub densities_requested: RefCell<Vec<f32>>,
    pub refuse_tracking: bool,
    pub tracking_requested: Option<TrackingCaps>,
    pub config_values: HashMap<&'static str, f32>,
    pub recenter_count: usize,
    pub refuse_rendering: bool,
    pub rendering_config: Option<(BackbufferDesc, DistortionCaps)>,
    pub eye_offsets: PerEye<Vec3>,
    pub pose_requests: Vec<(i64, PerEye<Vec3>)>,
    pub poses: PerEye<Pose>,
    pub fail_poses_at: Option<i64>,
    pub fail_timing_at: Option<i64>,
    pub render_order: [Eye; Eye::COUNT],
    pub projections_requested: RefCell<Vec<(FovPort, f32, f32)>>,
    pub submitted: Vec<(PerEye<Pose>, PerEye<EyeTexture>)>,
    pub destroyed: bool,
}

impl MockDevice {
    /// Value placed at row 0, column 3 of every projection.
    pub const PROJECTION_MARKER: f32 = 42.0;

    pub fn new() -> Self {
        Self::with_journal(journal())
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            resolution: Size::new(1920, 1080),
            fov: PerEye::new(
                FovPort::new(1.33, 1.33, 1.06, 1.09),
                FovPort::new(1.33, 1.33, 1.09, 1.06),
            ),
            recommended: PerEye::new(Size::new(1182, 1461), Size::new(1182, 1461)),
            densities_requested: RefCell::new(Vec::new()),
            refuse_tracking: false,
            tracking_requested: None,
            config_values: HashMap::new(),
            recenter_count: 0,
            refuse_rendering: false,
            rendering_config: None,
            eye_offsets: PerEye::new(Vec3::new(-0.032, 0.0, 0.0), Vec3::new(0.032, 0.0, 0.0)),
            pose_requests: Vec::new(),
            poses: PerEye::new(
                Pose::new(Vec3::new(-0.032, 0.0, 0.0), Quat::from_rotation_y(0.1)),
                Pose::new(Vec3::new(0.032, 0.0, 0.0), Quat::from_rotation_y(0.1)),
            ),
            fail_poses_at: None,
            fail_timing_at: None,
            render_order: [Eye::Left, Eye::Right],
            projections_requested: RefCell::new(Vec::new()),
            submitted: Vec::new(),
            destroyed: false,
        }
    }

    fn record(&self, event: Event) {
        self.journal.borrow_mut().push(event);
    }
}

impl HmdDevice for MockDevice {
    fn resolution(&self) -> Size {
        self.resolution
    }

    fn default_eye_fov(&self, eye: Eye) -> FovPort {
        self.fov[eye]
    }

    fn fov_texture_size(&self, eye: Eye, _fov: FovPort, pixel_density: f32) -> Size {
        self.densities_requested.borrow_mut().push(pixel_density);
        self.recommended[eye]
    }

    fn configure_tracking(&mut self, supported: TrackingCaps, _required: TrackingCaps) -> bool {
        self.tracking_requested = Some(supported);
        !self.refuse_tracking
    }

    fn config_float(&self, key: &str, default: f32) -> f32 {
        self.config_values.get(key).copied().unwrap_or(default)
    }

    fn recenter_pose(&mut self) {
        self.recenter_count += 1;
    }

    fn configure_rendering(
        &mut self,
        backbuffer: BackbufferDesc,
        caps: DistortionCaps,
        fov: &PerEye<FovPort>,
    ) -> Option<PerEye<EyeRenderDesc>> {
        self.rendering_config = Some((backbuffer, caps));
        if self.refuse_rendering {
            return None;
        }
        Some(PerEye::from_fn(|eye| EyeRenderDesc {
            eye,
            fov: fov[eye],
            hmd_to_eye_offset: self.eye_offsets[eye],
        }))
    }

    fn begin_frame_timing(&mut self, frame: i64) -> Option<FrameTiming> {
        self.record(Event::BeginFrame(frame));
        if self.fail_timing_at == Some(frame) {
            return None;
        }
        Some(FrameTiming {
            delta_seconds: 1.0 / 75.0,
            this_frame_seconds: frame as f64 / 75.0,
            ..FrameTiming::default()
        })
    }

    fn eye_poses(&mut self, frame: i64, offsets: &PerEye<Vec3>) -> Option<PerEye<Pose>> {
        self.record(Event::EyePoses(frame));
        self.pose_requests.push((frame, *offsets));
        if self.fail_poses_at == Some(frame) {
            return None;
        }
        Some(self.poses)
    }

    fn eye_render_order(&self) -> [Eye; Eye::COUNT] {
        self.render_order
    }

    fn perspective_projection(&self, fov: FovPort, near: f32, far: f32) -> RowMajorMatrix {
        self.projections_requested.borrow_mut().push((fov, near, far));
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        m[0][3] = Self::PROJECTION_MARKER;
        RowMajorMatrix(m)
    }

    fn end_frame(&mut self, poses: &PerEye<Pose>, textures: &PerEye<EyeTexture>) {
        self.record(Event::EndFrame);
        self.submitted.push((*poses, *textures));
    }

    fn destroy(&mut self) {
        self.record(Event::DeviceDestroy);
        self.destroyed = true;
    }
}

// ── backend ───────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub struct MockTarget {
    pub eye: Eye,
    pub handle: TextureHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Create(TargetDesc),
    Destroy(TextureHandle),
}

pub struct MockBackend {
    pub journal: Journal,
    pub calls: Vec<BackendCall>,
    pub fail_on_create: Option<Eye>,
    pub bound: Option<Eye>,
    pub clear_colors: Vec<[f64; 4]>,
    next_handle: u64,
    live: Vec<TextureHandle>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_journal(journal())
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            calls: Vec::new(),
            fail_on_create: None,
            bound: None,
            clear_colors: Vec::new(),
            next_handle: 100,
            live: Vec::new(),
        }
    }

    pub fn live_targets(&self) -> usize {
        self.live.len()
    }

    fn record(&self, event: Event) {
        self.journal.borrow_mut().push(event);
    }
}

impl RenderBackend for MockBackend {
    type Target = MockTarget;

    fn create_target(&mut self, desc: TargetDesc) -> Result<MockTarget, HmdError> {
        self.calls.push(BackendCall::Create(desc));
        if self.fail_on_create == Some(desc.eye) {
            return Err(HmdError::resource_allocation("mock refused"));
        }
        self.record(Event::CreateTarget(desc.eye));
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.live.push(handle);
        Ok(MockTarget { eye: desc.eye, handle })
    }

    fn native_handle(&self, target: &MockTarget) -> TextureHandle {
        target.handle
    }

    fn set_viewport(&mut self, viewport: EyeViewport) {
        self.record(Event::Viewport(viewport));
    }

    fn bind_target(&mut self, target: &MockTarget) {
        self.bound = Some(target.eye);
        self.record(Event::Bind(target.eye));
    }

    fn clear(&mut self, color: [f64; 4]) {
        self.clear_colors.push(color);
        self.record(Event::Clear);
    }

    fn unbind_target(&mut self) {
        self.bound = None;
        self.record(Event::Unbind);
    }

    fn restore_default_state(&mut self) {
        self.record(Event::RestoreDefaults);
    }

    fn destroy_target(&mut self, target: MockTarget) {
        self.calls.push(BackendCall::Destroy(target.handle));
        self.live.retain(|h| *h != target.handle);
        self.record(Event::DestroyTarget(target.eye));
    }
}

// ── scene ─────────────────────────────────────────────────────────────────

pub struct MockScene {
    pub journal: Journal,
    pub matrices: Vec<(Mat4, Mat4)>,
    pub fail_setup: bool,
}

impl MockScene {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            matrices: Vec::new(),
            fail_setup: false,
        }
    }
}

impl SceneRenderer<MockTarget> for MockScene {
    fn setup(&mut self) -> Result<(), HmdError> {
        if self.fail_setup {
            return Err(HmdError::resource_allocation("scene buffers"));
        }
        self.journal.borrow_mut().push(Event::SceneSetup);
        Ok(())
    }

    fn update_matrix(&mut self, projection: &Mat4, view: &Mat4) {
        self.matrices.push((*projection, *view));
        self.journal.borrow_mut().push(Event::UpdateMatrix);
    }

    fn draw(&mut self, target: &MockTarget) {
        self.journal.borrow_mut().push(Event::Draw(target.eye));
    }

    fn destroy(&mut self) {
        self.journal.borrow_mut().push(Event::SceneDestroy);
    }
}
