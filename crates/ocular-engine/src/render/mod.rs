//! Eye render targets and the graphics collaborators behind them.
//!
//! The session never talks to a graphics API directly. It allocates targets
//! and binds/clears them through [`RenderBackend`], and hands the bound target
//! to a [`SceneRenderer`] for drawing. [`WgpuBackend`] is the wgpu
//! implementation used by the windowed runtime.

mod backend;
mod scene;
mod targets;
mod wgpu_backend;

pub use backend::{RenderBackend, TargetDesc};
pub use scene::SceneRenderer;
pub use targets::{EyeRenderTarget, EyeRenderTargetManager};
pub use wgpu_backend::{WgpuBackend, WgpuEyeTarget};
