//! Head pose to view/projection transforms.
//!
//! Pure functions over glam types. The only external input is the projection
//! the device computes from a FOV port; everything else can be driven with
//! synthetic poses in tests.

mod pipeline;

pub use pipeline::{
    compute_projection_matrix, compute_view_matrix, projection_from_device, EyeMatrices,
};
