//! Pixel-space and per-eye types shared across the engine.
//!
//! Canonical pixel space:
//! - Physical pixels of the eye render target
//! - Origin top-left
//! - +X right, +Y down
//!
//! World space (poses, scene transform) is right-handed, +Y up, metres.

mod eye;
mod size;
mod viewport;

pub use eye::{Eye, PerEye};
pub use size::Size;
pub use viewport::EyeViewport;
