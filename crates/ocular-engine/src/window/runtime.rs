use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App, AppControl, WgpuSession};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::frame::HmdSession;
use crate::hmd::{DisplayDescriptor, HmdConfig, HmdDevice, SessionState};
use crate::monitor::{find_matching_monitor, MonitorId, WinitMonitors};
use crate::render::WgpuBackend;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Put the window fullscreen on the monitor driving the panel, when one
    /// is found.
    pub fullscreen: bool,

    /// Window size when not fullscreen.
    pub windowed_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ocular".to_string(),
            fullscreen: true,
            windowed_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Where the mirror window goes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowPlacement {
    /// Borderless fullscreen on the monitor driving the panel.
    Fullscreen(MonitorId),
    Windowed,
}

/// Picks the window placement from the matcher result.
pub fn choose_placement(
    config: &RuntimeConfig,
    display: DisplayDescriptor,
    monitor: Option<MonitorId>,
) -> WindowPlacement {
    match monitor {
        Some(id) if config.fullscreen => WindowPlacement::Fullscreen(id),
        Some(_) => WindowPlacement::Windowed,
        None => {
            if config.fullscreen {
                log::warn!(
                    "no monitor offers {}x{}; falling back to a window",
                    display.preferred_width(),
                    display.preferred_height()
                );
            }
            WindowPlacement::Windowed
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the headset, runs the event loop until the window closes, and
    /// tears the session down.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, hmd_config: HmdConfig, mut app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let device = app.create_device().context("failed to open the hmd device")?;
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let mut state = AppState {
            config,
            gpu_init,
            hmd_config,
            app,
            pending_device: Some(device),
            hmd: None,
            exit_requested: false,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// The live session plus the window it mirrors into.
///
/// Field order matters: the session (and its GPU resources) drops before
/// the surface and window.
struct HmdWindow<D, S> {
    session: WgpuSession<D, S>,
    entry: WindowEntry,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    hmd_config: HmdConfig,
    app: A,

    pending_device: Option<A::Device>,
    hmd: Option<HmdWindow<A::Device, A::Scene>>,

    exit_requested: bool,
    /// First fatal error; returned from [`Runtime::run`].
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.shutdown();
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        let Some(mut hmd) = self.hmd.take() else {
            return;
        };
        if hmd.session.state() != SessionState::Destroyed {
            if let Err(e) = hmd.session.destroy() {
                log::warn!("session teardown: {e}");
            }
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let device = self
            .pending_device
            .take()
            .context("hmd device already consumed")?;

        let display = DisplayDescriptor::resolve(device.resolution(), &self.hmd_config);
        let monitors = WinitMonitors::from_event_loop(event_loop);
        let monitor =
            find_matching_monitor(&monitors, display.preferred_width(), display.preferred_height());

        let mut attrs = Window::default_attributes().with_title(self.config.title.clone());
        attrs = match choose_placement(&self.config, display, monitor) {
            WindowPlacement::Fullscreen(id) => {
                let handle = monitors.handle(id).cloned();
                log::info!(
                    "placing window on {:?} ({})",
                    id,
                    handle
                        .as_ref()
                        .and_then(|h| h.name())
                        .unwrap_or_else(|| "unnamed".to_string())
                );
                attrs.with_fullscreen(Some(Fullscreen::Borderless(handle)))
            }
            WindowPlacement::Windowed => attrs.with_inner_size(self.config.windowed_size),
        };

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let app = &mut self.app;
        let (backend, scene) = entry.with_gpu(|gpu| -> Result<_> {
            let backend = WgpuBackend::new(
                gpu.device().clone(),
                gpu.queue().clone(),
                gpu.surface_format(),
            );
            let scene = app.create_scene(gpu).context("failed to create the scene renderer")?;
            Ok((backend, scene))
        })?;

        let mut session = HmdSession::new(device, backend, scene, self.hmd_config.clone());
        session.setup().context("hmd session setup failed")?;
        self.app.on_session_ready(&mut session);

        entry.with_window(|w| w.request_redraw());
        self.hmd = Some(HmdWindow { session, entry });
        Ok(())
    }

    /// Renders one headset frame and mirrors it. Returns `false` to stop.
    fn redraw(&mut self) -> Result<bool> {
        let Some(hmd) = self.hmd.as_mut() else {
            return Ok(true);
        };

        match hmd.session.render_frame() {
            Ok(()) => {}
            Err(e) if !e.is_fatal() => log::warn!("dropped frame: {e}"),
            Err(e) => return Err(e).context("frame rendering failed"),
        }

        if self.app.on_frame(&mut hmd.session) == AppControl::Exit {
            return Ok(false);
        }

        let Some(targets) = hmd.session.eye_targets() else {
            return Ok(true);
        };
        let eyes = targets.as_ref().map(|_, t| t.target().color_texture());

        let mut fatal = false;
        hmd.entry.with_gpu_mut(|gpu| {
            if let Err(err) = gpu.mirror_eyes(eyes) {
                log::debug!("mirror skipped: {err:?}");
                fatal = gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal;
            }
        });
        anyhow::ensure!(!fatal, "mirror surface out of memory");
        Ok(true)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.hmd.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.open(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // The device paces frames, so redraw continuously.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(hmd) = &self.hmd {
            hmd.entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(hmd) = self.hmd.as_mut() else {
            return;
        };
        if hmd.entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                hmd.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = hmd.entry.with_window(|w| w.inner_size());
                hmd.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(true) => {}
                Ok(false) => self.request_exit(event_loop),
                Err(e) => self.fail(event_loop, e),
            },

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
