//! Ocular engine crate.
//!
//! Drives a stereoscopic head-mounted display: per-eye render targets, head
//! pose to view matrices, device frame pacing and submission, and placement
//! of the mirror window on the monitor driving the panel.

pub mod coords;
pub mod hmd;
pub mod pose;
pub mod render;
pub mod status;
pub mod monitor;
pub mod frame;
pub mod time;

pub mod device;
pub mod window;
pub mod core;

pub mod logging;

#[cfg(test)]
mod testing;
