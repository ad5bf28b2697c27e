//! Head-mounted display device layer.
//!
//! This module is responsible for:
//! - the [`HmdDevice`] driver contract and the data it exchanges
//! - deriving the per-eye render layout from the device at setup
//! - resolving platform panel quirks into one [`DisplayDescriptor`]
//! - a [`SimulatedHmd`] for running without hardware

mod caps;
mod config;
mod configure;
mod device;
mod display;
mod error;
mod sim;

pub use caps::{DistortionCaps, TrackingCaps};
pub use config::{HmdConfig, DEFAULT_EYE_HEIGHT, DEFAULT_IPD};
pub use configure::{
    configure, initial_scene_transform, shared_eye_size, DisplayLayout, DisplaySetup,
};
pub use device::{
    BackbufferDesc, EyeRenderDesc, EyeTexture, FovPort, FrameTiming, HmdDevice, Pose,
    RowMajorMatrix, TextureHandle, KEY_EYE_HEIGHT, KEY_IPD,
};
pub use display::DisplayDescriptor;
pub use error::{HmdError, SessionState};
pub use sim::{SimulatedHmd, SimulatedHmdConfig};
