use crate::coords::{Eye, PerEye, Size};

/// One eye's copy rectangle on the mirror surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MirrorRegion {
    /// Top-left of the copied area inside the eye target.
    pub src_x: u32,
    pub src_y: u32,
    /// Top-left of the destination on the surface.
    pub dst_x: u32,
    pub dst_y: u32,
    pub width: u32,
    pub height: u32,
}

impl MirrorRegion {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Lays both eyes out side by side, left eye on the left half.
///
/// Copies cannot scale, so an eye larger than its half is cropped around its
/// centre and a smaller one is centred in its half.
pub fn side_by_side(surface: Size, eye: Size) -> PerEye<MirrorRegion> {
    let half = surface.width / 2;
    let width = eye.width.min(half);
    let height = eye.height.min(surface.height);

    PerEye::from_fn(|e| {
        let slot = match e {
            Eye::Left => 0,
            Eye::Right => half,
        };
        MirrorRegion {
            src_x: (eye.width - width) / 2,
            src_y: (eye.height - height) / 2,
            dst_x: slot + (half - width) / 2,
            dst_y: (surface.height - height) / 2,
            width,
            height,
        }
    })
}
