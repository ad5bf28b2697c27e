//! Per-frame orchestration.
//!
//! [`HmdSession`] owns the device, the render backend and the scene renderer
//! and drives them through setup, one stereo frame per
//! [`render_frame`](HmdSession::render_frame) call, and shutdown.

mod session;

pub use session::{HmdSession, FRAME_COUNT_SENTINEL};
