use glam::{Mat4, Vec3};

use crate::coords::{Eye, EyeViewport, PerEye, Size};

use super::{FovPort, HmdConfig, HmdDevice, HmdError, TrackingCaps, KEY_EYE_HEIGHT, KEY_IPD};

/// Per-eye render layout derived from the device at setup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayLayout {
    /// Shared size of both eye render targets.
    pub render_target_size: Size,
    pub viewports: PerEye<EyeViewport>,
    pub fov_ports: PerEye<FovPort>,
}

/// Everything setup learns from the device before render configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplaySetup {
    pub layout: DisplayLayout,
    /// Initial world placement of the scene origin.
    pub scene_transform: Mat4,
    pub ipd: f32,
    pub eye_height: f32,
}

/// Shared per-eye target size: summed widths halved, tallest height.
///
/// Near-symmetric eyes get their exact recommended size; asymmetric eyes get
/// an average width that is workable for both.
pub fn shared_eye_size(left: Size, right: Size) -> Size {
    let width = (left.width + right.width) / 2;
    let height = left.height.max(right.height);
    Size::new(width, height)
}

/// Scene placement for a camera standing at `eye_height`, backed off along +Z
/// by `ipd * 10`, looking at the point straight above the scene origin.
pub fn initial_scene_transform(ipd: f32, eye_height: f32) -> Mat4 {
    let center = Vec3::Y * eye_height;
    let eye = Vec3::new(0.0, eye_height, ipd * 10.0);
    let player = Mat4::look_at_rh(eye, center, Vec3::Y).inverse();
    player.inverse()
}

/// Queries the device for its render layout and starts tracking.
///
/// Fails with [`HmdError::DeviceInit`] when the device refuses to start the
/// tracking sensor. Recenters the pose on success so "forward" is wherever the
/// user currently faces.
pub fn configure<D>(device: &mut D, config: &HmdConfig) -> Result<DisplaySetup, HmdError>
where
    D: HmdDevice + ?Sized,
{
    let resolution = device.resolution();
    log::debug!("resolution={}x{}", resolution.width, resolution.height);

    let fov_ports = PerEye::from_fn(|eye| device.default_eye_fov(eye));
    let recommended = PerEye::from_fn(|eye| {
        device.fov_texture_size(eye, fov_ports[eye], config.pixel_density)
    });
    log::debug!(
        "left={}x{} right={}x{}",
        recommended[Eye::Left].width,
        recommended[Eye::Left].height,
        recommended[Eye::Right].width,
        recommended[Eye::Right].height,
    );

    let render_target_size = shared_eye_size(recommended.left, recommended.right);
    if render_target_size.is_empty() {
        return Err(HmdError::device_init(format!(
            "device recommended an empty eye texture ({}x{})",
            render_target_size.width, render_target_size.height
        )));
    }
    log::debug!(
        "using eye size {}x{}",
        render_target_size.width,
        render_target_size.height
    );

    let viewports = PerEye::from_fn(|_| EyeViewport::at_origin(render_target_size));

    // Nothing is required; the device degrades to whatever it supports.
    if !device.configure_tracking(config.tracking, TrackingCaps::NONE) {
        return Err(HmdError::device_init("unable to start the tracking sensor"));
    }

    let ipd = device.config_float(KEY_IPD, config.default_ipd);
    let eye_height = device.config_float(KEY_EYE_HEIGHT, config.default_eye_height);
    let scene_transform = initial_scene_transform(ipd, eye_height);
    device.recenter_pose();

    log::debug!("eye_height={eye_height} ipd={ipd}");

    Ok(DisplaySetup {
        layout: DisplayLayout {
            render_target_size,
            viewports,
            fov_ports,
        },
        scene_transform,
        ipd,
        eye_height,
    })
}
