use glam::{Mat4, Quat, Vec3};

use crate::hmd::{FovPort, HmdDevice, RowMajorMatrix, DEFAULT_EYE_HEIGHT};

/// View and projection for one eye in one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EyeMatrices {
    pub view: Mat4,
    pub projection: Mat4,
}

/// Builds an eye's view matrix from its tracked pose and the scene placement.
///
/// Composition (column vectors): `R⁻¹ · T(−p) · S · T(h)` where `h` is the
/// default eye height along +Y. With tracking disabled `R⁻¹` is dropped and
/// the camera follows head position only.
pub fn compute_view_matrix(
    head_position: Vec3,
    head_orientation: Quat,
    scene_transform: &Mat4,
    tracking_enabled: bool,
) -> Mat4 {
    let mut view = Mat4::from_translation(-head_position) * *scene_transform;
    if tracking_enabled {
        view = Mat4::from_quat(head_orientation.inverse()) * view;
    }
    // Device poses are floor- or recenter-relative; lift back to eye level.
    view * Mat4::from_translation(Vec3::Y * DEFAULT_EYE_HEIGHT)
}

/// Converts a device row-major projection into glam's column-major layout.
pub fn projection_from_device(raw: RowMajorMatrix) -> Mat4 {
    Mat4::from_cols_array_2d(&raw.0).transpose()
}

/// Requests `fov`'s projection from the device and converts it.
pub fn compute_projection_matrix<D>(device: &D, fov: FovPort, near: f32, far: f32) -> Mat4
where
    D: HmdDevice + ?Sized,
{
    projection_from_device(device.perspective_projection(fov, near, far))
}
