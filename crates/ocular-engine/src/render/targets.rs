use crate::coords::{Eye, EyeViewport, PerEye};
use crate::hmd::{EyeTexture, HmdError};

use super::{RenderBackend, TargetDesc};

/// One eye's render target plus what the compositor needs to sample it.
#[derive(Debug)]
pub struct EyeRenderTarget<T> {
    eye: Eye,
    viewport: EyeViewport,
    texture: EyeTexture,
    target: T,
}

impl<T> EyeRenderTarget<T> {
    pub fn eye(&self) -> Eye {
        self.eye
    }

    pub fn viewport(&self) -> EyeViewport {
        self.viewport
    }

    /// Submission descriptor (native handle, size, viewport).
    pub fn texture(&self) -> EyeTexture {
        self.texture
    }

    /// Backend object to bind and draw into.
    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Owns exactly one render target per eye between setup and shutdown.
#[derive(Debug)]
pub struct EyeRenderTargetManager<T> {
    targets: Option<PerEye<EyeRenderTarget<T>>>,
}

impl<T> Default for EyeRenderTargetManager<T> {
    fn default() -> Self {
        Self { targets: None }
    }
}

impl<T> EyeRenderTargetManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a color + depth target covering `viewport`.
    pub fn allocate<B>(
        backend: &mut B,
        eye: Eye,
        viewport: EyeViewport,
    ) -> Result<EyeRenderTarget<T>, HmdError>
    where
        B: RenderBackend<Target = T> + ?Sized,
    {
        let size = viewport.size;
        let target = backend.create_target(TargetDesc::new(eye, size))?;
        let texture = EyeTexture {
            handle: backend.native_handle(&target),
            texture_size: size,
            viewport,
        };
        log::debug!("allocated {eye:?} target {}x{} ({:?})", size.width, size.height, texture.handle);
        Ok(EyeRenderTarget { eye, viewport, texture, target })
    }

    pub fn release<B>(backend: &mut B, target: EyeRenderTarget<T>)
    where
        B: RenderBackend<Target = T> + ?Sized,
    {
        log::debug!("releasing {:?} target", target.eye);
        backend.destroy_target(target.target);
    }

    /// Allocates both eyes. On failure nothing stays allocated.
    pub fn allocate_all<B>(
        &mut self,
        backend: &mut B,
        viewports: &PerEye<EyeViewport>,
    ) -> Result<(), HmdError>
    where
        B: RenderBackend<Target = T> + ?Sized,
    {
        self.release_all(backend);

        let left = Self::allocate(backend, Eye::Left, viewports[Eye::Left])?;
        let right = match Self::allocate(backend, Eye::Right, viewports[Eye::Right]) {
            Ok(t) => t,
            Err(e) => {
                Self::release(backend, left);
                return Err(e);
            }
        };

        self.targets = Some(PerEye::new(left, right));
        Ok(())
    }

    /// Releases both eyes, if allocated. Only call outside a frame.
    pub fn release_all<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Target = T> + ?Sized,
    {
        if let Some(targets) = self.targets.take() {
            Self::release(backend, targets.left);
            Self::release(backend, targets.right);
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.targets.is_some()
    }

    pub fn get(&self, eye: Eye) -> Option<&EyeRenderTarget<T>> {
        self.targets.as_ref().map(|t| &t[eye])
    }

    pub fn targets(&self) -> Option<&PerEye<EyeRenderTarget<T>>> {
        self.targets.as_ref()
    }

    /// Submission descriptors for both eyes.
    pub fn textures(&self) -> Option<PerEye<EyeTexture>> {
        self.targets
            .as_ref()
            .map(|t| PerEye::new(t.left.texture, t.right.texture))
    }
}
