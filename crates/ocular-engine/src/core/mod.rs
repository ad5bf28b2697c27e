//! Contracts between the windowed runtime and the application.
//!
//! The application supplies the headset driver and the scene renderer; the
//! runtime owns the window, the GPU and the [`HmdSession`](crate::frame::HmdSession).

mod app;

pub use app::{App, AppControl, WgpuSession};
