use vello::kurbo::{Affine, BezPath, Cap, Stroke};
use vello::peniko::{Brush, Color, Fill};

use super::Graphics;

/// One recorded draw call.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A fill call.
    Fill {
        /// Transform the fill was issued with.
        transform: Affine,
        /// The brush, as a solid color where applicable.
        color: Option<Color>,
        /// The filled path.
        path: BezPath,
    },
    /// A stroke call.
    Stroke {
        /// Transform the stroke was issued with.
        transform: Affine,
        /// The brush, as a solid color where applicable.
        color: Option<Color>,
        /// Stroke width.
        width: f64,
        /// Cap style of open ends.
        cap: Cap,
        /// The stroked (already trimmed) path.
        path: BezPath,
    },
}

/// A [`Graphics`] backend that records draw calls instead of rasterizing,
/// so widget rendering can be asserted on in headless tests.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// The recorded draw calls, in submission order.
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The solid colors of all fill calls, in order.
    pub fn fill_colors(&self) -> Vec<Color> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { color, .. } => *color,
                DrawOp::Stroke { .. } => None,
            })
            .collect()
    }

    /// The solid colors of all stroke calls, in order.
    pub fn stroke_colors(&self) -> Vec<Color> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { color, .. } => *color,
                DrawOp::Fill { .. } => None,
            })
            .collect()
    }
}

fn solid_color(brush: &Brush) -> Option<Color> {
    match brush {
        Brush::Solid(color) => Some(*color),
        _ => None,
    }
}

impl Graphics for Recorder {
    fn fill(
        &mut self,
        _fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        _brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.ops.push(DrawOp::Fill {
            transform,
            color: solid_color(brush),
            path: shape.clone(),
        });
    }

    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        _brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.ops.push(DrawOp::Stroke {
            transform,
            color: solid_color(brush),
            width: style.width,
            cap: style.start_cap,
            path: shape.clone(),
        });
    }
}
