use super::Size;

/// Per-eye raster rectangle inside that eye's render target, in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EyeViewport {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

impl EyeViewport {
    #[inline]
    pub const fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, size }
    }

    /// Viewport covering a whole target of `size`, anchored at the origin.
    #[inline]
    pub const fn at_origin(size: Size) -> Self {
        Self::new(0, 0, size)
    }

    #[inline]
    pub const fn width(self) -> u32 {
        self.size.width
    }

    #[inline]
    pub const fn height(self) -> u32 {
        self.size.height
    }
}
