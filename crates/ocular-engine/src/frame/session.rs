use glam::{Mat4, Vec3};

use crate::coords::PerEye;
use crate::hmd::{
    configure, DisplayDescriptor, DisplayLayout, FrameTiming, HmdConfig, HmdDevice, HmdError,
    SessionState,
};
use crate::monitor::{find_matching_monitor, MonitorId, MonitorSource};
use crate::pose::{compute_projection_matrix, compute_view_matrix, EyeMatrices};
use crate::render::{EyeRenderTarget, EyeRenderTargetManager, RenderBackend, SceneRenderer};
use crate::status::{ListenerId, StatusListener, StatusListenerRegistry};
use crate::time::{FrameClock, FrameTime};

/// Frame count before the first frame; the first frame is `0`.
pub const FRAME_COUNT_SENTINEL: i64 = -1;

/// Values learned at setup that every frame reads.
#[derive(Debug, Copy, Clone)]
struct Configured {
    layout: DisplayLayout,
    eye_offsets: PerEye<Vec3>,
    ipd: f32,
    eye_height: f32,
}

/// A stereo rendering session on one head-mounted display.
///
/// Lifecycle: [`setup`](Self::setup) once, then any number of
/// [`render_frame`](Self::render_frame) calls, then [`destroy`](Self::destroy).
/// Destroyed is terminal; frame calls outside the configured state fail with
/// [`HmdError::InvalidState`].
pub struct HmdSession<D, B, S>
where
    B: RenderBackend,
{
    device: D,
    backend: B,
    scene: S,
    config: HmdConfig,
    display: DisplayDescriptor,

    state: SessionState,
    configured: Option<Configured>,
    scene_transform: Mat4,
    tracking_enabled: bool,
    frame_count: i64,

    targets: EyeRenderTargetManager<B::Target>,
    listeners: StatusListenerRegistry,

    last_timing: Option<FrameTiming>,
    clock: FrameClock,
}

impl<D, B, S> HmdSession<D, B, S>
where
    D: HmdDevice,
    B: RenderBackend,
    S: SceneRenderer<B::Target>,
{
    /// Wraps the collaborators. Nothing is configured until [`setup`](Self::setup).
    pub fn new(device: D, backend: B, scene: S, config: HmdConfig) -> Self {
        let display = DisplayDescriptor::resolve(device.resolution(), &config);
        if display.transposed {
            log::info!("panel is transposed; swapping width and height");
        }

        Self {
            device,
            backend,
            scene,
            tracking_enabled: config.tracking_enabled,
            config,
            display,
            state: SessionState::Uninitialized,
            configured: None,
            scene_transform: Mat4::IDENTITY,
            frame_count: FRAME_COUNT_SENTINEL,
            targets: EyeRenderTargetManager::new(),
            listeners: StatusListenerRegistry::new(),
            last_timing: None,
            clock: FrameClock::new(),
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Configures the device, allocates both eye targets and sets up the scene.
    ///
    /// Any failure leaves the session uninitialized with nothing allocated.
    pub fn setup(&mut self) -> Result<(), HmdError> {
        self.require(SessionState::Uninitialized, "set up")?;

        let display = configure(&mut self.device, &self.config)?;

        let backbuffer = self.display.backbuffer();
        let caps = self.display.distortion_caps(self.config.distortion);
        log::debug!(
            "backbuffer {}x{} caps=0x{:x}",
            backbuffer.size.width,
            backbuffer.size.height,
            caps.bits()
        );

        let descs = self
            .device
            .configure_rendering(backbuffer, caps, &display.layout.fov_ports)
            .ok_or_else(|| HmdError::device_init("device rejected the render configuration"))?;
        let eye_offsets = descs.map(|_, desc| desc.hmd_to_eye_offset);

        self.targets
            .allocate_all(&mut self.backend, &display.layout.viewports)?;

        if let Err(e) = self.scene.setup() {
            self.targets.release_all(&mut self.backend);
            return Err(e);
        }

        self.scene_transform = display.scene_transform;
        self.configured = Some(Configured {
            layout: display.layout,
            eye_offsets,
            ipd: display.ipd,
            eye_height: display.eye_height,
        });
        self.frame_count = FRAME_COUNT_SENTINEL;
        self.state = SessionState::Configured;
        self.clock.reset();

        log::info!(
            "hmd session configured ({}x{} per eye)",
            display.layout.render_target_size.width,
            display.layout.render_target_size.height
        );
        Ok(())
    }

    /// Renders both eyes for the next frame and submits them to the device.
    ///
    /// May block inside the device's frame pacing. A device that has no
    /// timing or poses for this frame yields [`HmdError::DeviceQuery`]; the
    /// frame count has still advanced, so the next call moves on to a new frame.
    pub fn render_frame(&mut self) -> Result<(), HmdError> {
        self.require(SessionState::Configured, "render a frame")?;
        let Some(configured) = self.configured else {
            return Err(self.invalid("render a frame"));
        };

        self.frame_count += 1;
        let frame = self.frame_count;

        let timing = self
            .device
            .begin_frame_timing(frame)
            .ok_or(HmdError::DeviceQuery { frame, call: "begin_frame_timing" })?;
        self.last_timing = Some(timing);

        let poses = self
            .device
            .eye_poses(frame, &configured.eye_offsets)
            .ok_or(HmdError::DeviceQuery { frame, call: "eye_poses" })?;

        let Some(targets) = self.targets.targets() else {
            return Err(self.invalid("render a frame"));
        };

        for eye in self.device.eye_render_order() {
            let target: &EyeRenderTarget<B::Target> = &targets[eye];
            let pose = poses[eye];

            self.backend.set_viewport(configured.layout.viewports[eye]);
            self.backend.bind_target(target.target());

            let matrices = EyeMatrices {
                view: compute_view_matrix(
                    pose.position,
                    pose.orientation,
                    &self.scene_transform,
                    self.tracking_enabled,
                ),
                projection: compute_projection_matrix(
                    &self.device,
                    configured.layout.fov_ports[eye],
                    self.config.near_plane,
                    self.config.far_plane,
                ),
            };

            self.backend.clear(self.config.clear_color);
            self.scene.update_matrix(&matrices.projection, &matrices.view);
            self.scene.draw(target.target());

            self.listeners
                .notify(pose.position, pose.orientation, &matrices.projection);
        }

        self.backend.unbind_target();
        self.backend.restore_default_state();

        let textures = PerEye::new(targets.left.texture(), targets.right.texture());
        self.device.end_frame(&poses, &textures);

        let ft = self.clock.tick(frame);
        log::trace!("frame {frame} done in {:.2}ms", ft.dt * 1000.0);
        Ok(())
    }

    /// Tears down the scene renderer, both eye targets and the device.
    ///
    /// Safe to call from any state except destroyed; an unconfigured session
    /// only releases the device.
    pub fn destroy(&mut self) -> Result<(), HmdError> {
        if self.state == SessionState::Destroyed {
            return Err(self.invalid("destroy"));
        }

        if self.state == SessionState::Configured {
            self.scene.destroy();
        }
        self.targets.release_all(&mut self.backend);
        self.device.destroy();

        self.configured = None;
        self.state = SessionState::Destroyed;
        log::info!("hmd session destroyed after {} frames", self.frame_count + 1);
        Ok(())
    }

    fn require(&self, expected: SessionState, op: &'static str) -> Result<(), HmdError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(op))
        }
    }

    fn invalid(&self, op: &'static str) -> HmdError {
        HmdError::InvalidState { op, state: self.state }
    }

    // ── camera ────────────────────────────────────────────────────────────

    /// Makes the user's current head yaw and position the new forward origin.
    pub fn reset_camera(&mut self) {
        self.device.recenter_pose();
    }

    /// Moves the scene by `(dx, dy, dz)` in scene space.
    pub fn update_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.scene_transform *= Mat4::from_translation(Vec3::new(dx, dy, dz));
    }

    pub fn set_head_tracking_enabled(&mut self, enabled: bool) {
        self.tracking_enabled = enabled;
    }

    pub fn is_head_tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }

    pub fn scene_transform(&self) -> Mat4 {
        self.scene_transform
    }

    // ── display ───────────────────────────────────────────────────────────

    /// Monitor whose video modes contain the panel's preferred size.
    pub fn preferred_monitor<M>(&self, monitors: &M) -> Option<MonitorId>
    where
        M: MonitorSource + ?Sized,
    {
        find_matching_monitor(
            monitors,
            self.display.preferred_width(),
            self.display.preferred_height(),
        )
    }

    pub fn preferred_width(&self) -> u32 {
        self.display.preferred_width()
    }

    pub fn preferred_height(&self) -> u32 {
        self.display.preferred_height()
    }

    pub fn display(&self) -> DisplayDescriptor {
        self.display
    }

    // ── listeners ─────────────────────────────────────────────────────────

    /// Registers an observer notified once per eye per frame, in render order.
    pub fn add_status_listener(&mut self, listener: impl StatusListener + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the last frame started, or [`FRAME_COUNT_SENTINEL`].
    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    pub fn layout(&self) -> Option<&DisplayLayout> {
        self.configured.as_ref().map(|c| &c.layout)
    }

    /// Eye height read from the device config store at setup.
    pub fn eye_height(&self) -> Option<f32> {
        self.configured.map(|c| c.eye_height)
    }

    pub fn ipd(&self) -> Option<f32> {
        self.configured.map(|c| c.ipd)
    }

    /// Device timing of the last frame started.
    pub fn last_frame_timing(&self) -> Option<FrameTiming> {
        self.last_timing
    }

    /// Host timing of the last frame completed.
    pub fn last_frame_time(&self) -> Option<FrameTime> {
        self.clock.last_frame()
    }

    pub fn eye_targets(&self) -> Option<&PerEye<EyeRenderTarget<B::Target>>> {
        self.targets.targets()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Quat;

    use super::*;
    use crate::coords::{Eye, Size};
    use crate::hmd::{DistortionCaps, Pose, DEFAULT_EYE_HEIGHT};
    use crate::testing::{journal, Event, Journal, MockBackend, MockDevice, MockScene};

    type TestSession = HmdSession<MockDevice, MockBackend, MockScene>;

    fn session_with(config: HmdConfig, tweak: impl FnOnce(&mut MockDevice)) -> (TestSession, Journal) {
        let log = journal();
        let mut device = MockDevice::with_journal(log.clone());
        tweak(&mut device);
        let session = HmdSession::new(
            device,
            MockBackend::with_journal(log.clone()),
            MockScene::with_journal(log.clone()),
            config,
        );
        (session, log)
    }

    fn configured() -> (TestSession, Journal) {
        let (mut session, log) = session_with(HmdConfig::default(), |_| {});
        session.setup().unwrap();
        log.borrow_mut().clear();
        (session, log)
    }

    fn draws(log: &Journal) -> Vec<Eye> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Draw(eye) => Some(*eye),
                _ => None,
            })
            .collect()
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn setup_allocates_one_target_per_eye_and_keeps_sentinel() {
        let (mut session, log) = session_with(HmdConfig::default(), |_| {});
        session.setup().unwrap();

        assert_eq!(session.state(), SessionState::Configured);
        assert_eq!(session.frame_count(), FRAME_COUNT_SENTINEL);
        assert_eq!(session.backend().live_targets(), 2);

        let targets = session.eye_targets().unwrap();
        assert_eq!(targets.left.target().eye, Eye::Left);
        assert_eq!(targets.right.target().eye, Eye::Right);

        let events = log.borrow();
        let creates = events.iter().filter(|e| matches!(e, Event::CreateTarget(_))).count();
        assert_eq!(creates, 2);
        assert_eq!(events.last(), Some(&Event::SceneSetup));
    }

    #[test]
    fn setup_records_offsets_from_render_descriptors() {
        let (mut session, _) = configured();
        session.render_frame().unwrap();

        let (_, offsets) = session.device().pose_requests[0];
        assert_eq!(offsets, session.device().eye_offsets);
    }

    #[test]
    fn setup_reads_eye_height_and_ipd_from_device_store() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| {
            d.config_values.insert(crate::hmd::KEY_EYE_HEIGHT, 1.8);
            d.config_values.insert(crate::hmd::KEY_IPD, 0.07);
        });
        assert_eq!(session.eye_height(), None);

        session.setup().unwrap();
        assert_eq!(session.eye_height(), Some(1.8));
        assert_eq!(session.ipd(), Some(0.07));
    }

    #[test]
    fn transposed_panel_swaps_backbuffer_and_adds_fullscreen_hint() {
        let config = HmdConfig { transposed_panel: Some(true), ..Default::default() };
        let (mut session, _) = session_with(config, |_| {});
        assert_eq!(session.preferred_width(), 1080);
        assert_eq!(session.preferred_height(), 1920);

        session.setup().unwrap();
        let (backbuffer, caps) = session.device().rendering_config.unwrap();
        assert_eq!(backbuffer.size, Size::new(1080, 1920));
        assert_eq!(backbuffer.multisample, 1);
        assert_eq!(caps, DistortionCaps::STANDARD.with_fullscreen_hint(true));
    }

    #[test]
    fn landscape_panel_requests_standard_caps() {
        let config = HmdConfig { transposed_panel: Some(false), ..Default::default() };
        let (mut session, _) = session_with(config, |_| {});
        session.setup().unwrap();

        let (backbuffer, caps) = session.device().rendering_config.unwrap();
        assert_eq!(backbuffer.size, Size::new(1920, 1080));
        assert_eq!(caps, DistortionCaps::STANDARD);
    }

    #[test]
    fn refused_tracking_fails_setup() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| d.refuse_tracking = true);
        let err = session.setup().unwrap_err();

        assert!(matches!(err, HmdError::DeviceInit(_)));
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert_eq!(session.backend().live_targets(), 0);
    }

    #[test]
    fn refused_render_configuration_fails_setup() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| d.refuse_rendering = true);
        let err = session.setup().unwrap_err();

        assert!(matches!(err, HmdError::DeviceInit(_)));
        assert!(session.eye_targets().is_none());
    }

    #[test]
    fn scene_setup_failure_releases_targets() {
        let log = journal();
        let mut scene = MockScene::with_journal(log.clone());
        scene.fail_setup = true;
        let mut session = HmdSession::new(
            MockDevice::with_journal(log.clone()),
            MockBackend::with_journal(log.clone()),
            scene,
            HmdConfig::default(),
        );

        let err = session.setup().unwrap_err();
        assert!(matches!(err, HmdError::ResourceAllocation(_)));
        assert_eq!(session.backend().live_targets(), 0);
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn setup_twice_is_invalid() {
        let (mut session, _) = configured();
        let err = session.setup().unwrap_err();
        assert!(matches!(
            err,
            HmdError::InvalidState { state: SessionState::Configured, .. }
        ));
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_count_advances_by_one_per_frame() {
        let (mut session, log) = configured();
        for _ in 0..5 {
            session.render_frame().unwrap();
        }

        assert_eq!(session.frame_count(), FRAME_COUNT_SENTINEL + 5);
        assert_eq!(session.device().submitted.len(), 5);

        let begun: Vec<i64> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::BeginFrame(f) => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(begun, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn frame_follows_device_call_sequence() {
        let (mut session, log) = configured();
        session.render_frame().unwrap();

        let viewport = session.layout().unwrap().viewports[Eye::Left];
        let expected_eye = |eye| {
            vec![
                Event::Viewport(viewport),
                Event::Bind(eye),
                Event::Clear,
                Event::UpdateMatrix,
                Event::Draw(eye),
            ]
        };

        let mut expected = vec![Event::BeginFrame(0), Event::EyePoses(0)];
        expected.extend(expected_eye(Eye::Left));
        expected.extend(expected_eye(Eye::Right));
        expected.extend([Event::Unbind, Event::RestoreDefaults, Event::EndFrame]);

        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn render_order_right_first_draws_right_before_left() {
        let (mut session, log) = session_with(HmdConfig::default(), |d| {
            d.render_order = [Eye::Right, Eye::Left];
        });
        session.setup().unwrap();
        log.borrow_mut().clear();

        session.render_frame().unwrap();
        assert_eq!(draws(&log), vec![Eye::Right, Eye::Left]);
    }

    #[test]
    fn eyes_use_their_own_pose_and_fov() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| {
            d.render_order = [Eye::Right, Eye::Left];
            d.poses = PerEye::new(
                Pose::new(Vec3::new(-1.0, 0.0, 0.0), Quat::IDENTITY),
                Pose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY),
            );
        });
        session.setup().unwrap();
        session.render_frame().unwrap();

        let scene = session.scene_transform();
        let (_, first_view) = session.scene().matrices[0];
        let right_view = compute_view_matrix(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, &scene, true);
        assert!(first_view.abs_diff_eq(right_view, 1e-5));

        let requested = session.device().projections_requested.borrow();
        assert_eq!(requested[0].0, session.device().fov[Eye::Right]);
        assert_eq!(requested[1].0, session.device().fov[Eye::Left]);
        assert_eq!((requested[0].1, requested[0].2), (0.1, 1_000_000.0));
    }

    #[test]
    fn submitted_textures_are_the_eye_targets() {
        let (mut session, _) = configured();
        session.render_frame().unwrap();

        let (poses, textures) = session.device().submitted[0];
        let targets = session.eye_targets().unwrap();
        assert_eq!(textures.left, targets.left.texture());
        assert_eq!(textures.right, targets.right.texture());
        assert_eq!(poses, session.device().poses);
    }

    #[test]
    fn clear_uses_configured_color() {
        let config = HmdConfig { clear_color: [0.1, 0.2, 0.3, 1.0], ..Default::default() };
        let (mut session, _) = session_with(config, |_| {});
        session.setup().unwrap();
        session.render_frame().unwrap();

        assert_eq!(session.backend().clear_colors, vec![[0.1, 0.2, 0.3, 1.0]; 2]);
        assert_eq!(session.backend().bound, None);
    }

    #[test]
    fn missing_poses_surface_as_device_query() {
        let (mut session, log) = session_with(HmdConfig::default(), |d| d.fail_poses_at = Some(1));
        session.setup().unwrap();
        session.render_frame().unwrap();
        log.borrow_mut().clear();

        let err = session.render_frame().unwrap_err();
        assert_eq!(err, HmdError::DeviceQuery { frame: 1, call: "eye_poses" });
        assert!(draws(&log).is_empty());
        assert_eq!(session.device().submitted.len(), 1);

        // The failed frame is not retried.
        session.render_frame().unwrap();
        assert_eq!(session.frame_count(), 2);
    }

    #[test]
    fn missing_timing_surfaces_as_device_query() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| d.fail_timing_at = Some(0));
        session.setup().unwrap();

        let err = session.render_frame().unwrap_err();
        assert_eq!(err, HmdError::DeviceQuery { frame: 0, call: "begin_frame_timing" });
        assert!(session.last_frame_timing().is_none());
    }

    #[test]
    fn frame_timing_and_host_time_are_kept() {
        let (mut session, _) = configured();
        session.render_frame().unwrap();
        session.render_frame().unwrap();

        let timing = session.last_frame_timing().unwrap();
        assert!((timing.this_frame_seconds - 1.0 / 75.0).abs() < 1e-9);
        assert_eq!(session.last_frame_time().unwrap().frame_index, 1);
    }

    // ── lifecycle errors ──────────────────────────────────────────────────

    #[test]
    fn render_before_setup_is_invalid() {
        let (mut session, log) = session_with(HmdConfig::default(), |_| {});
        let err = session.render_frame().unwrap_err();

        assert!(matches!(
            err,
            HmdError::InvalidState { state: SessionState::Uninitialized, .. }
        ));
        assert!(log.borrow().is_empty());
        assert_eq!(session.frame_count(), FRAME_COUNT_SENTINEL);
    }

    #[test]
    fn destroy_tears_down_in_order_and_is_terminal() {
        let (mut session, log) = configured();
        session.render_frame().unwrap();
        log.borrow_mut().clear();

        session.destroy().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::SceneDestroy,
                Event::DestroyTarget(Eye::Left),
                Event::DestroyTarget(Eye::Right),
                Event::DeviceDestroy,
            ]
        );
        assert_eq!(session.backend().live_targets(), 0);
        assert!(session.device().destroyed);

        assert!(matches!(
            session.render_frame(),
            Err(HmdError::InvalidState { state: SessionState::Destroyed, .. })
        ));
        assert!(session.destroy().is_err());
        assert!(session.setup().is_err());
    }

    #[test]
    fn destroy_before_setup_only_releases_device() {
        let (mut session, log) = session_with(HmdConfig::default(), |_| {});
        session.destroy().unwrap();
        assert_eq!(*log.borrow(), vec![Event::DeviceDestroy]);
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn reset_camera_recenters_device() {
        let (mut session, _) = configured();
        let before = session.device().recenter_count;
        session.reset_camera();
        assert_eq!(session.device().recenter_count, before + 1);
    }

    #[test]
    fn update_camera_translates_scene() {
        let (mut session, _) = configured();
        let before = session.scene_transform();
        session.update_camera(0.5, 0.0, -2.0);

        let expected = before * Mat4::from_translation(Vec3::new(0.5, 0.0, -2.0));
        assert!(session.scene_transform().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn disabling_tracking_ignores_orientation() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| {
            d.poses = PerEye::from_fn(|_| Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.2)));
        });
        session.setup().unwrap();
        assert!(session.is_head_tracking_enabled());

        session.set_head_tracking_enabled(false);
        session.render_frame().unwrap();

        let (_, view) = session.scene().matrices[0];
        let expected = session.scene_transform()
            * Mat4::from_translation(Vec3::Y * DEFAULT_EYE_HEIGHT);
        assert!(view.abs_diff_eq(expected, 1e-5));
    }

    // ── listeners ─────────────────────────────────────────────────────────

    #[test]
    fn listeners_see_each_eye_in_render_order() {
        let (mut session, _) = session_with(HmdConfig::default(), |d| {
            d.render_order = [Eye::Right, Eye::Left];
        });
        session.setup().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.add_status_listener(move |p: Vec3, _q: Quat, proj: &Mat4| {
            sink.borrow_mut().push((p, proj.col(3).x));
        });

        session.render_frame().unwrap();
        session.render_frame().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        let poses = session.device().poses;
        assert_eq!(seen[0].0, poses[Eye::Right].position);
        assert_eq!(seen[1].0, poses[Eye::Left].position);
        assert_eq!(seen[0].1, MockDevice::PROJECTION_MARKER);
    }

    #[test]
    fn removed_listener_is_not_notified() {
        let (mut session, _) = configured();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = session.add_status_listener(move |_: Vec3, _: Quat, _: &Mat4| {
            *sink.borrow_mut() += 1;
        });

        session.render_frame().unwrap();
        assert!(session.remove_status_listener(id));
        assert!(!session.remove_status_listener(id));
        session.render_frame().unwrap();

        assert_eq!(*count.borrow(), 2);
    }

    // ── display ───────────────────────────────────────────────────────────

    struct OneMonitor(Size);

    impl MonitorSource for OneMonitor {
        fn monitors(&self) -> Vec<MonitorId> {
            vec![MonitorId(7)]
        }

        fn video_modes(&self, _monitor: MonitorId) -> Vec<Size> {
            vec![Size::new(1280, 720), self.0]
        }
    }

    #[test]
    fn preferred_monitor_searches_preferred_size() {
        let config = HmdConfig { transposed_panel: Some(true), ..Default::default() };
        let (session, _) = session_with(config, |_| {});

        assert_eq!(session.preferred_monitor(&OneMonitor(Size::new(1080, 1920))), Some(MonitorId(7)));
        assert_eq!(session.preferred_monitor(&OneMonitor(Size::new(1920, 1080))), None);
    }
}
