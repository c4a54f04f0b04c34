//! Render port

use crate::foundation::math::Mat4;

/// Interface to a renderer; the simulation publishes world matrices and the
/// backend draws whatever it has bound to the id
pub trait RenderPort {
    /// Submit an entity's world matrix for this frame
    fn draw(&mut self, entity: &str, world: &Mat4);
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderPort for NullRenderer {
    fn draw(&mut self, _entity: &str, _world: &Mat4) {}
}
