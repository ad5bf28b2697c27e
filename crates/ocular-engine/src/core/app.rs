use anyhow::Result;

use crate::device::Gpu;
use crate::frame::HmdSession;
use crate::hmd::HmdDevice;
use crate::render::{SceneRenderer, WgpuBackend, WgpuEyeTarget};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Session type the runtime drives.
pub type WgpuSession<D, S> = HmdSession<D, WgpuBackend, S>;

/// Application contract implemented by binaries.
pub trait App {
    type Device: HmdDevice;
    type Scene: SceneRenderer<WgpuEyeTarget>;

    /// Opens the headset. Called once, before any window exists, so the
    /// runtime can look for the monitor driving the panel.
    fn create_device(&mut self) -> Result<Self::Device>;

    /// Builds the scene renderer on the runtime's GPU.
    fn create_scene(&mut self, gpu: &Gpu<'_>) -> Result<Self::Scene>;

    /// Called once after setup succeeded, before the first frame.
    fn on_session_ready(&mut self, session: &mut WgpuSession<Self::Device, Self::Scene>) {
        let _ = session;
    }

    /// Called after every rendered frame. Camera and tracking changes made
    /// here apply from the next frame on.
    fn on_frame(&mut self, session: &mut WgpuSession<Self::Device, Self::Scene>) -> AppControl {
        let _ = session;
        AppControl::Continue
    }
}
