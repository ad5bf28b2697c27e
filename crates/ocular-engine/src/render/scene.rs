use glam::Mat4;

use crate::hmd::HmdError;

/// Draws the actual scene into whatever eye target is bound.
///
/// `T` is the backend's target type, so renderers written against a concrete
/// backend can reach its attachments.
pub trait SceneRenderer<T> {
    fn setup(&mut self) -> Result<(), HmdError> {
        Ok(())
    }

    /// Camera for the next [`draw`](Self::draw).
    fn update_matrix(&mut self, projection: &Mat4, view: &Mat4);

    fn draw(&mut self, target: &T);

    fn destroy(&mut self) {}
}
