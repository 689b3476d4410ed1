use std::f64::consts::PI;
use std::time::{Duration, Instant};

use nalgebra::Vector2;
use switchkit_core::animation::{Animation, AnimationRegistry, Keyframes, Value};
use switchkit_core::layer::ShapeLayer;
use switchkit_core::update::Update;
use switchkit_core::vg::kurbo::{Affine, BezPath, Line, Point, Rect, RoundedRect};
use switchkit_core::vgi::{shape_to_path, Graphics};
use switchkit_theme::SwitchTheme;

use crate::toggle::{SkinContext, SwitchSkin, ToggleControl};

/// A toggle switch whose stroked line morphs into a circular knob, with a
/// color crossfade on the track.
///
/// Off renders the extended full line; on renders the collapsed knob at the
/// leading edge. The morph runs over four keyframe times with a deliberate
/// near-instant crossover at the midpoint.
pub type LineKnobSwitch = ToggleControl<LineKnobSkin>;

/// The layer properties the switch animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchProperty {
    /// `stroke_start` of the knob/line layer.
    KnobStrokeStart,
    /// `stroke_end` of the knob/line layer.
    KnobStrokeEnd,
    /// Fill color of the track layer.
    TrackFill,
    /// Rotation angle of the whole control, in radians.
    Rotation,
}

const TURN_ON_KEY: &str = "TurnOn";
const TURN_OFF_KEY: &str = "TurnOff";
const COLOR_KEY: &str = "Color";
const ROTATE_KEY: &str = "Rotate";

// A stroke segment this short renders as a round-capped dot: the knob.
const COLLAPSED_STROKE_END: f64 = 1e-4;

const STROKE_TIMES: [f64; 4] = [0.0, 0.49, 0.51, 1.0];
const COLOR_TIMES: [f64; 4] = [0.0, 0.5, 0.51, 1.0];

fn size_scale(size: Vector2<f64>) -> f64 {
    (size.x.min(size.y) / 100.0).max(0.0)
}

fn line_width(line_thickness: f64, size: Vector2<f64>) -> f64 {
    (line_thickness * size_scale(size)).max(0.0)
}

fn corner_radius(height: f64, line_width: f64) -> f64 {
    (height / 2.0 - line_width).max(0.0)
}

fn knob_stroke_width(height: f64, line_width: f64) -> f64 {
    (height - 3.0 * line_width + 1.0).max(0.0)
}

fn track_path(size: Vector2<f64>, line_width: f64) -> BezPath {
    let x1 = (size.x - line_width).max(line_width);
    let y1 = (size.y - line_width).max(line_width);
    shape_to_path(&RoundedRect::new(
        line_width,
        line_width,
        x1,
        y1,
        corner_radius(size.y, line_width),
    ))
}

// The knob line runs along the vertical center with its endpoints inset by
// half the control height, so the collapsed round cap sits centered inside
// the track's end arc.
fn knob_path(size: Vector2<f64>) -> BezPath {
    let half_height = size.y / 2.0;
    let x0 = half_height;
    let x1 = (size.x - half_height).max(x0);
    shape_to_path(&Line::new((x0, half_height), (x1, half_height)))
}

/// The line-to-knob visual, attached to a [`ToggleControl`].
#[derive(Debug, Clone)]
pub struct LineKnobSkin {
    theme: SwitchTheme,
    rotate_when_value_change: bool,
    track: ShapeLayer,
    knob: ShapeLayer,
    animations: AnimationRegistry<SwitchProperty>,
    rotation: f64,
    rotation_target: f64,
    center: Point,
    was_animating: bool,
}

impl Default for LineKnobSkin {
    fn default() -> Self {
        Self::new(SwitchTheme::default())
    }
}

impl LineKnobSkin {
    /// Create a skin with the given theme.
    pub fn new(theme: SwitchTheme) -> Self {
        Self {
            theme,
            rotate_when_value_change: false,
            track: ShapeLayer::new(BezPath::new()),
            knob: ShapeLayer::new(BezPath::new()),
            animations: AnimationRegistry::new(),
            rotation: 0.0,
            rotation_target: 0.0,
            center: Point::ORIGIN,
            was_animating: false,
        }
    }

    /// The skin's theme.
    pub fn theme(&self) -> &SwitchTheme {
        &self.theme
    }

    /// Whether the whole control rotates by a half-turn on every change.
    pub fn rotate_when_value_change(&self) -> bool {
        self.rotate_when_value_change
    }

    /// The track layer, as most recently built and animated.
    pub fn track_layer(&self) -> &ShapeLayer {
        &self.track
    }

    /// The knob/line layer, as most recently built and animated.
    pub fn knob_layer(&self) -> &ShapeLayer {
        &self.knob
    }

    /// The in-flight and filled-forward animations, keyed by direction.
    pub fn animations(&self) -> &AnimationRegistry<SwitchProperty> {
        &self.animations
    }

    /// The currently applied rotation angle in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub(crate) fn set_theme(&mut self, theme: SwitchTheme) {
        self.theme = theme;
    }

    pub(crate) fn set_rotate_when_value_change(&mut self, rotate: bool) {
        self.rotate_when_value_change = rotate;
    }

    fn apply(&mut self, property: SwitchProperty, value: Value) {
        match property {
            SwitchProperty::KnobStrokeStart => {
                if let Some(v) = value.as_scalar() {
                    self.knob.stroke_start = v;
                }
            },
            SwitchProperty::KnobStrokeEnd => {
                if let Some(v) = value.as_scalar() {
                    self.knob.stroke_end = v;
                }
            },
            SwitchProperty::TrackFill => {
                if let Some(c) = value.as_color() {
                    self.track.fill_color = Some(c);
                }
            },
            SwitchProperty::Rotation => {
                if let Some(angle) = value.as_scalar() {
                    self.rotation = angle;
                    let transform = Affine::rotate_about(angle, self.center);
                    self.track.transform = transform;
                    self.knob.transform = transform;
                }
            },
        }
    }

    // The core transition: stroke morph keyed by direction, color crossfade
    // flipping at the midpoint, optional accumulated half-turn.
    fn animate_transition(&mut self, turning_on: bool, duration: Duration) {
        let now = Instant::now();

        let (key, end_values) = if turning_on {
            (TURN_ON_KEY, [1.0, 1.0, 1.0, COLLAPSED_STROKE_END])
        } else {
            (TURN_OFF_KEY, [COLLAPSED_STROKE_END, 1.0, 1.0, 1.0])
        };
        let stroke = Animation::new(now, duration)
            .with_track(
                SwitchProperty::KnobStrokeStart,
                Keyframes::scalar(&STROKE_TIMES, &[0.0, 0.0, 0.0, 0.0]),
            )
            .with_track(
                SwitchProperty::KnobStrokeEnd,
                Keyframes::scalar(&STROKE_TIMES, &end_values),
            );
        self.animations.add(key, stroke);

        let from = self.theme.fill_color(!turning_on);
        let to = self.theme.fill_color(turning_on);
        let color = Animation::new(now, duration).with_track(
            SwitchProperty::TrackFill,
            Keyframes::color(&COLOR_TIMES, &[from, from, to, to]),
        );
        self.animations.add(COLOR_KEY, color);

        if self.rotate_when_value_change {
            let from = self.rotation_target;
            self.rotation_target += PI;
            let rotate = Animation::new(now, duration).with_track(
                SwitchProperty::Rotation,
                Keyframes::scalar(&[0.0, 1.0], &[from, self.rotation_target]),
            );
            self.animations.add(ROTATE_KEY, rotate);
        }

        self.was_animating = true;
    }

    fn snap_to_state(&mut self, is_on: bool) {
        self.animations.clear();
        self.was_animating = false;
        self.knob.stroke_start = 0.0;
        self.knob.stroke_end = if is_on { COLLAPSED_STROKE_END } else { 1.0 };
        self.track.fill_color = Some(self.theme.fill_color(is_on));
        if self.rotate_when_value_change {
            self.rotation_target += PI;
            self.apply(SwitchProperty::Rotation, Value::Scalar(self.rotation_target));
        }
    }
}

impl SwitchSkin for LineKnobSkin {
    fn build(&mut self, ctx: &SkinContext) {
        let width = line_width(self.theme.line_thickness, ctx.size);
        self.center = Point::new(ctx.size.x / 2.0, ctx.size.y / 2.0);

        // Dropping in-flight animations freezes any rotation where it is.
        self.animations.clear();
        self.was_animating = false;
        self.rotation_target = self.rotation;
        let transform = Affine::rotate_about(self.rotation, self.center);

        let mut track = ShapeLayer::new(track_path(ctx.size, width))
            .with_fill(self.theme.fill_color(ctx.is_on))
            .with_stroke(self.theme.line_color, width);
        track.transform = transform;
        self.track = track;

        let mut knob = ShapeLayer::new(knob_path(ctx.size))
            .with_stroke(self.theme.knob_color, knob_stroke_width(ctx.size.y, width))
            .with_round_caps();
        knob.stroke_end = if ctx.is_on { COLLAPSED_STROKE_END } else { 1.0 };
        knob.transform = transform;
        self.knob = knob;
    }

    fn state_changed(&mut self, ctx: &SkinContext, is_on: bool, animate: bool) {
        if animate {
            self.animate_transition(is_on, ctx.duration);
        } else {
            self.snap_to_state(is_on);
        }
    }

    fn tick(&mut self, now: Instant) -> Update {
        if self.animations.is_empty() {
            return Update::empty();
        }

        let animating = self.animations.is_animating(now);
        for (property, value) in self.animations.sample(now) {
            self.apply(property, value);
        }

        if animating {
            self.was_animating = true;
            Update::DRAW
        } else if self.was_animating {
            // One more frame so the exact end values reach the screen.
            self.was_animating = false;
            Update::DRAW
        } else {
            Update::empty()
        }
    }

    fn render(&mut self, graphics: &mut dyn Graphics, base: Affine) {
        self.track.render(graphics, base);
        self.knob.render(graphics, base);
    }
}

impl ToggleControl<LineKnobSkin> {
    /// Create a switch with the default theme and the default 80×40 frame.
    pub fn new() -> Self {
        Self::with_skin(LineKnobSkin::default())
    }

    /// Set the theme and return self.
    pub fn with_theme(self, theme: SwitchTheme) -> Self {
        self.apply_with(|this| {
            this.set_theme(theme);
        })
    }

    /// Enable the decorative half-turn on every change and return self.
    pub fn with_rotation(self, rotate: bool) -> Self {
        self.apply_with(|this| this.skin_mut().set_rotate_when_value_change(rotate))
    }

    /// The switch's theme.
    pub fn theme(&self) -> &SwitchTheme {
        self.skin().theme()
    }

    /// Replace the theme and synchronously rebuild the render tree.
    pub fn set_theme(&mut self, theme: SwitchTheme) -> Update {
        self.skin_mut().set_theme(theme);
        self.reset_view();
        Update::DRAW
    }

    /// Whether the whole control rotates by a half-turn on every change.
    pub fn rotate_when_value_change(&self) -> bool {
        self.skin().rotate_when_value_change()
    }

    /// Enable or disable the decorative half-turn on every change.
    pub fn set_rotate_when_value_change(&mut self, rotate: bool) {
        self.skin_mut().set_rotate_when_value_change(rotate);
    }

    /// The effective stroke width for the current frame and theme.
    pub fn line_width(&self) -> f64 {
        let frame: Rect = self.frame();
        line_width(
            self.theme().line_thickness,
            Vector2::new(frame.width(), frame.height()),
        )
    }
}

impl Default for ToggleControl<LineKnobSkin> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchkit_core::vg::kurbo::Shape;

    #[test]
    fn scale_follows_smaller_dimension() {
        assert_eq!(size_scale(Vector2::new(80.0, 40.0)), 0.4);
        assert_eq!(size_scale(Vector2::new(40.0, 80.0)), 0.4);
        assert_eq!(size_scale(Vector2::new(200.0, 100.0)), 1.0);
    }

    #[test]
    fn degenerate_bounds_clamp_to_zero() {
        let size = Vector2::new(0.0, 0.0);
        assert_eq!(line_width(10.0, size), 0.0);
        assert_eq!(corner_radius(0.0, 0.0), 0.0);
        assert_eq!(knob_stroke_width(0.0, 0.0), 1.0);

        let negative = Vector2::new(-10.0, -10.0);
        assert_eq!(line_width(10.0, negative), 0.0);
        // A heavy theme on a small control must not go negative either.
        assert_eq!(knob_stroke_width(4.0, 2.0), 0.0);
        assert_eq!(corner_radius(4.0, 8.0), 0.0);
    }

    #[test]
    fn track_inset_never_inverts() {
        let path = track_path(Vector2::new(4.0, 4.0), 10.0);
        let bbox = path.bounding_box();
        assert!(bbox.width() >= 0.0);
        assert!(bbox.height() >= 0.0);
    }

    #[test]
    fn knob_line_spans_half_height_insets() {
        let path = knob_path(Vector2::new(80.0, 40.0));
        let bbox = path.bounding_box();
        assert_eq!(bbox.x0, 20.0);
        assert_eq!(bbox.x1, 60.0);
        assert_eq!(bbox.y0, 20.0);
    }

    #[test]
    fn knob_line_collapses_for_narrow_controls() {
        let path = knob_path(Vector2::new(30.0, 40.0));
        let bbox = path.bounding_box();
        assert_eq!(bbox.x0, bbox.x1);
    }

    #[test]
    fn knob_stroke_width_matches_reference_geometry() {
        // 80×40 with thickness 10: scale 0.4 → line width 4, knob stroke 29.
        let size = Vector2::new(80.0, 40.0);
        let width = line_width(10.0, size);
        assert_eq!(width, 4.0);
        assert_eq!(knob_stroke_width(size.y, width), 29.0);
        assert_eq!(corner_radius(size.y, width), 16.0);
    }
}
