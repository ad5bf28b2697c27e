//! Windowed runtime.
//!
//! Owns the winit event loop and the mirror window, places the window on the
//! monitor driving the headset panel, and drives one session frame per redraw.

mod runtime;

pub use runtime::{choose_placement, Runtime, RuntimeConfig, WindowPlacement};
