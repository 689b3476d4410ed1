use vello::kurbo::{Affine, BezPath, Stroke};
use vello::peniko::{Brush, Fill};
use vello::Scene;

use super::Graphics;

/// A [`Graphics`] backend that appends draw calls to a vello [`Scene`].
pub struct SceneGraphics<'a> {
    scene: &'a mut Scene,
}

impl<'a> SceneGraphics<'a> {
    /// Wrap a vello scene.
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }
}

impl Graphics for SceneGraphics<'_> {
    fn fill(
        &mut self,
        fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.scene
            .fill(fill_rule, transform, brush, brush_transform, shape);
    }

    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.scene
            .stroke(style, transform, brush, brush_transform, shape);
    }
}
