use crate::coords::{Eye, EyeViewport, Size};
use crate::hmd::{HmdError, TextureHandle};

/// Minimum depth precision of every eye target.
pub const MIN_DEPTH_BITS: u32 = 24;

/// Allocation request for one eye target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetDesc {
    pub eye: Eye,
    pub size: Size,
    pub min_depth_bits: u32,
}

impl TargetDesc {
    pub const fn new(eye: Eye, size: Size) -> Self {
        Self { eye, size, min_depth_bits: MIN_DEPTH_BITS }
    }
}

/// Graphics-API side of eye rendering.
///
/// Binding is stateful: after [`bind_target`](Self::bind_target) every clear
/// and draw goes to that target until [`unbind_target`](Self::unbind_target).
pub trait RenderBackend {
    /// A color + depth attachment pair.
    type Target;

    fn create_target(&mut self, desc: TargetDesc) -> Result<Self::Target, HmdError>;

    /// Native handle of the target's color attachment, as the compositor expects it.
    fn native_handle(&self, target: &Self::Target) -> TextureHandle;

    fn set_viewport(&mut self, viewport: EyeViewport);

    fn bind_target(&mut self, target: &Self::Target);

    /// Clears color and depth of the bound target.
    fn clear(&mut self, color: [f64; 4]);

    fn unbind_target(&mut self);

    /// Returns raster state to what the rest of the application expects.
    fn restore_default_state(&mut self);

    /// Destroys both attachments and the target object.
    fn destroy_target(&mut self, target: Self::Target);
}
