//! GPU device and mirror surface.
//!
//! Creates the wgpu instance, adapter, device and queue for the runtime
//! window, configures its surface, and blits the eye targets onto it so the
//! desktop shows what the headset shows.

mod error;
mod frame;
mod gpu;
mod init;
mod mirror;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use mirror::{side_by_side, MirrorRegion};
