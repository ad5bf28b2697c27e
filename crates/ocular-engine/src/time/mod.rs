//! Frame timing on the host clock.
//!
//! The device reports its own predicted timing per frame; [`FrameClock`]
//! measures what the render loop actually achieved.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
