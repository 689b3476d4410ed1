//! # Retained Shape Layers
//!
//! A [`ShapeLayer`] holds a vector path plus its paint state between frames,
//! the way a compositor layer would. Stroked layers expose normalized
//! `stroke_start`/`stroke_end` fractions along the path's arclength, so
//! animating them produces a drawing/erasing effect; with round caps a nearly
//! collapsed segment renders as a dot.

use vello::kurbo::{Affine, BezPath, Cap, CubicBez, ParamCurve, ParamCurveArclen, PathSeg, Stroke};
use vello::peniko::{Brush, Color, Fill};

use crate::vgi::Graphics;

const ARCLEN_ACCURACY: f64 = 1e-4;

/// Trim `path` to the sub-path between the normalized arclength fractions
/// `start` and `end`.
///
/// Returns an empty path when the visible segment has no extent.
pub fn trim_path(path: &BezPath, start: f64, end: f64) -> BezPath {
    let start = start.clamp(0.0, 1.0);
    let end = end.clamp(0.0, 1.0);
    if start <= 0.0 && end >= 1.0 {
        return path.clone();
    }
    if end <= start {
        return BezPath::new();
    }

    let cubics: Vec<CubicBez> = path.segments().map(|seg| seg.to_cubic()).collect();
    let lengths: Vec<f64> = cubics.iter().map(|c| c.arclen(ARCLEN_ACCURACY)).collect();
    let total: f64 = lengths.iter().sum();
    if total <= 0.0 {
        return BezPath::new();
    }

    let lo = start * total;
    let hi = end * total;

    let mut walked = 0.0;
    let mut kept = Vec::new();
    for (cubic, length) in cubics.iter().zip(&lengths) {
        let seg_lo = walked;
        let seg_hi = walked + length;
        walked = seg_hi;
        if seg_hi <= lo || seg_lo >= hi || *length <= 0.0 {
            continue;
        }
        let t0 = if lo > seg_lo {
            cubic.inv_arclen(lo - seg_lo, ARCLEN_ACCURACY)
        } else {
            0.0
        };
        let t1 = if hi < seg_hi {
            cubic.inv_arclen(hi - seg_lo, ARCLEN_ACCURACY)
        } else {
            1.0
        };
        kept.push(PathSeg::Cubic(cubic.subsegment(t0..t1)));
    }
    BezPath::from_path_segments(kept.into_iter())
}

/// A retained path with its paint state.
#[derive(Debug, Clone)]
pub struct ShapeLayer {
    /// The full vector path in local coordinates.
    pub path: BezPath,
    /// Solid fill color, if the layer is filled.
    pub fill_color: Option<Color>,
    /// Solid stroke color, if the layer is stroked.
    pub stroke_color: Option<Color>,
    /// Stroke width in logical units.
    pub stroke_width: f64,
    /// Cap style for open stroke ends.
    pub cap: Cap,
    /// Normalized arclength fraction where the visible stroke begins.
    pub stroke_start: f64,
    /// Normalized arclength fraction where the visible stroke ends.
    pub stroke_end: f64,
    /// Local transform applied when rendering.
    pub transform: Affine,
}

impl ShapeLayer {
    /// Create an unpainted layer holding `path`.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill_color: None,
            stroke_color: None,
            stroke_width: 1.0,
            cap: Cap::Butt,
            stroke_start: 0.0,
            stroke_end: 1.0,
            transform: Affine::IDENTITY,
        }
    }

    /// Set the fill color and return self.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Set the stroke color and width and return self.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = width;
        self
    }

    /// Use round caps on open stroke ends and return self.
    pub fn with_round_caps(mut self) -> Self {
        self.cap = Cap::Round;
        self
    }

    /// The currently visible portion of the stroked path.
    pub fn visible_path(&self) -> BezPath {
        trim_path(&self.path, self.stroke_start, self.stroke_end)
    }

    /// Draw the layer: fill first, then the trimmed stroke on top.
    pub fn render(&self, graphics: &mut dyn Graphics, base: Affine) {
        let transform = base * self.transform;

        if let Some(color) = self.fill_color {
            graphics.fill(
                Fill::NonZero,
                transform,
                &Brush::Solid(color),
                None,
                &self.path,
            );
        }

        if let Some(color) = self.stroke_color {
            if self.stroke_width > 0.0 {
                let visible = self.visible_path();
                if !visible.elements().is_empty() {
                    graphics.stroke(
                        &Stroke::new(self.stroke_width).with_caps(self.cap),
                        transform,
                        &Brush::Solid(color),
                        None,
                        &visible,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vello::kurbo::{Line, Shape};

    fn horizontal_line() -> BezPath {
        Line::new((0.0, 0.0), (10.0, 0.0)).to_path(0.1)
    }

    #[test]
    fn trim_full_range_keeps_path() {
        let path = horizontal_line();
        let trimmed = trim_path(&path, 0.0, 1.0);
        assert_eq!(trimmed.elements(), path.elements());
    }

    #[test]
    fn trim_middle_of_line() {
        let trimmed = trim_path(&horizontal_line(), 0.25, 0.75);
        let bbox = trimmed.bounding_box();
        assert!((bbox.x0 - 2.5).abs() < 1e-6);
        assert!((bbox.x1 - 7.5).abs() < 1e-6);
    }

    #[test]
    fn trim_collapsed_segment_is_tiny_but_present() {
        let trimmed = trim_path(&horizontal_line(), 0.0, 1e-4);
        let bbox = trimmed.bounding_box();
        assert!(!trimmed.elements().is_empty());
        assert!(bbox.width() <= 1e-2);
    }

    #[test]
    fn trim_inverted_range_is_empty() {
        assert!(trim_path(&horizontal_line(), 0.7, 0.3).elements().is_empty());
        assert!(trim_path(&horizontal_line(), 0.5, 0.5).elements().is_empty());
    }

    #[test]
    fn trim_zero_length_path_is_empty() {
        let path = Line::new((3.0, 3.0), (3.0, 3.0)).to_path(0.1);
        assert!(trim_path(&path, 0.0, 0.5).elements().is_empty());
    }

    #[test]
    fn trim_spans_multiple_segments() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));

        // The second half of the arclength is exactly the vertical leg.
        let trimmed = trim_path(&path, 0.5, 1.0);
        let bbox = trimmed.bounding_box();
        assert!((bbox.x0 - 10.0).abs() < 1e-6);
        assert!((bbox.y1 - 10.0).abs() < 1e-6);
    }
}
