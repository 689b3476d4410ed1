//! # Keyframe Animation Engine
//!
//! Animations are explicit `(time-fraction, value)` breakpoint tracks sampled
//! against an [`Instant`]-based clock, grouped into named animations and held
//! in a per-control [`AnimationRegistry`]. Animations fill forwards: once
//! finished they keep reporting their final values until replaced or cleared.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use vello::peniko::Color;

/// A value a keyframe track can animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A scalar value, e.g. a stroke fraction or a rotation angle.
    Scalar(f64),
    /// A solid color value.
    Color(Color),
}

impl Value {
    /// Return the scalar payload, if this is a scalar value.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(v),
            Value::Color(_) => None,
        }
    }

    /// Return the color payload, if this is a color value.
    pub fn as_color(self) -> Option<Color> {
        match self {
            Value::Scalar(_) => None,
            Value::Color(c) => Some(c),
        }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(lerp(a, b, t)),
            (Value::Color(a), Value::Color(b)) => Value::Color(lerp_color(a, b, t as f32)),
            // Mismatched variants hold the starting value.
            (a, _) => a,
        }
    }
}

/// Linear interpolation between two colors.
///
/// `t` should be between 0.0 (start) and 1.0 (end).
pub fn lerp_color(start: Color, end: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let start_components = start.components;
    let end_components = end.components;

    let r = lerp(start_components[0] as f64, end_components[0] as f64, t as f64);
    let g = lerp(start_components[1] as f64, end_components[1] as f64, t as f64);
    let b = lerp(start_components[2] as f64, end_components[2] as f64, t as f64);
    let a = lerp(start_components[3] as f64, end_components[3] as f64, t as f64);

    Color::from_rgba8(
        (r * 255.0).clamp(0.0, 255.0) as u8,
        (g * 255.0).clamp(0.0, 255.0) as u8,
        (b * 255.0).clamp(0.0, 255.0) as u8,
        (a * 255.0).clamp(0.0, 255.0) as u8,
    )
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// A keyframe track: breakpoint times over `t ∈ [0, 1]` with one value per
/// breakpoint, linearly interpolated in between and clamped at the ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    times: Vec<f64>,
    values: Vec<Value>,
}

impl Keyframes {
    /// Create a track from breakpoint times and values.
    ///
    /// Times must be ascending within `[0, 1]` and match the value count;
    /// both are invariants of the callers, checked in debug builds.
    pub fn new(times: Vec<f64>, values: Vec<Value>) -> Self {
        debug_assert!(!times.is_empty());
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        Self { times, values }
    }

    /// Create a scalar track.
    pub fn scalar(times: &[f64], values: &[f64]) -> Self {
        Self::new(
            times.to_vec(),
            values.iter().map(|v| Value::Scalar(*v)).collect(),
        )
    }

    /// Create a color track.
    pub fn color(times: &[f64], values: &[Color]) -> Self {
        Self::new(
            times.to_vec(),
            values.iter().map(|c| Value::Color(*c)).collect(),
        )
    }

    /// Sample the track at time fraction `t`, clamped to the breakpoint range.
    ///
    /// Breakpoint values are returned exactly at and beyond the ends, so a
    /// finished animation reports its terminal value without float drift.
    pub fn sample(&self, t: f64) -> Value {
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if t <= first {
            return self.values[0];
        }
        if t >= last {
            return self.values[self.values.len() - 1];
        }

        let mut i = 0;
        while i + 1 < self.times.len() && self.times[i + 1] < t {
            i += 1;
        }
        let span = self.times[i + 1] - self.times[i];
        if span <= 0.0 {
            return self.values[i + 1];
        }
        let u = (t - self.times[i]) / span;
        if u <= 0.0 {
            return self.values[i];
        }
        if u >= 1.0 {
            return self.values[i + 1];
        }
        self.values[i].lerp(self.values[i + 1], u)
    }

    /// The value the track settles on when the animation completes.
    pub fn end_value(&self) -> Value {
        self.values[self.values.len() - 1]
    }
}

/// A named bundle of keyframe tracks running over a shared duration.
#[derive(Debug, Clone)]
pub struct Animation<P> {
    start: Instant,
    duration: Duration,
    tracks: Vec<(P, Keyframes)>,
}

impl<P: Copy + Eq> Animation<P> {
    /// Create an empty animation starting at `start`.
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self {
            start,
            duration,
            tracks: Vec::new(),
        }
    }

    /// Add a keyframe track targeting `property` and return self.
    pub fn with_track(mut self, property: P, frames: Keyframes) -> Self {
        self.tracks.push((property, frames));
        self
    }

    /// Progress through the animation at `now`, clamped to `[0, 1]`.
    ///
    /// A zero-duration animation is immediately complete.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the animation has run its full duration at `now`.
    pub fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// The animation's total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Sample every track at `now` and append `(property, value)` pairs.
    pub fn sample_into(&self, now: Instant, out: &mut Vec<(P, Value)>) {
        let t = self.progress(now);
        for (property, frames) in &self.tracks {
            out.push((*property, frames.sample(t)));
        }
    }

    /// The terminal value of the first track targeting `property`.
    pub fn end_value(&self, property: P) -> Option<Value> {
        self.tracks
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, frames)| frames.end_value())
    }
}

/// A per-control, insertion-ordered map from animation key to in-flight
/// animation.
///
/// Re-adding a key cancels the prior animation under that key and moves the
/// entry to the end of the application order. Sampling yields values in
/// registry order, so when two animations target the same property the most
/// recently added one wins.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry<P> {
    entries: IndexMap<&'static str, Animation<P>>,
}

impl<P: Copy + Eq> AnimationRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register `animation` under `key`, replacing any prior animation with
    /// the same key.
    pub fn add(&mut self, key: &'static str, animation: Animation<P>) {
        self.entries.shift_remove(key);
        self.entries.insert(key, animation);
    }

    /// Sample every registered animation at `now`, in registry order.
    pub fn sample(&self, now: Instant) -> Vec<(P, Value)> {
        let mut out = Vec::new();
        for animation in self.entries.values() {
            animation.sample_into(now, &mut out);
        }
        out
    }

    /// Whether any registered animation is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.entries.values().any(|a| !a.finished(now))
    }

    /// Look up the animation registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Animation<P>> {
        self.entries.get(key)
    }

    /// Whether an animation is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every registered animation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Prop {
        Stroke,
        Fill,
    }

    #[test]
    fn lerp_color_midpoint() {
        let start = Color::from_rgb8(0, 0, 0);
        let end = Color::from_rgb8(255, 255, 255);

        let mid = lerp_color(start, end, 0.5);
        for channel in &mid.components[..3] {
            let byte = channel * 255.0;
            assert!(byte > 120.0 && byte < 140.0);
        }
    }

    #[test]
    fn keyframes_clamp_and_hold() {
        let frames = Keyframes::scalar(&[0.0, 0.49, 0.51, 1.0], &[1.0, 1.0, 1.0, 0.0]);

        assert_eq!(frames.sample(-1.0), Value::Scalar(1.0));
        assert_eq!(frames.sample(0.25), Value::Scalar(1.0));
        assert_eq!(frames.sample(1.0), Value::Scalar(0.0));
        assert_eq!(frames.sample(2.0), Value::Scalar(0.0));
        assert_eq!(frames.end_value(), Value::Scalar(0.0));
    }

    #[test]
    fn keyframes_interpolate_between_breakpoints() {
        let frames = Keyframes::scalar(&[0.0, 1.0], &[0.0, 10.0]);
        assert_eq!(frames.sample(0.5), Value::Scalar(5.0));
    }

    #[test]
    fn color_track_flips_near_midpoint() {
        let from = Color::from_rgb8(229, 229, 229);
        let to = Color::from_rgb8(87, 233, 129);
        let frames = Keyframes::color(&[0.0, 0.5, 0.51, 1.0], &[from, from, to, to]);

        assert_eq!(frames.sample(0.3), Value::Color(from));
        assert_eq!(frames.sample(0.5), Value::Color(from));
        assert_eq!(frames.sample(0.51), Value::Color(to));
        assert_eq!(frames.sample(1.0), Value::Color(to));
    }

    #[test]
    fn animation_progress_clamps() {
        let t0 = Instant::now();
        let animation: Animation<Prop> = Animation::new(t0, Duration::from_millis(400));

        assert_eq!(animation.progress(t0), 0.0);
        assert_eq!(animation.progress(t0 + Duration::from_millis(200)), 0.5);
        assert_eq!(animation.progress(t0 + Duration::from_secs(10)), 1.0);
        assert!(animation.finished(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn zero_duration_animation_is_complete() {
        let t0 = Instant::now();
        let animation: Animation<Prop> = Animation::new(t0, Duration::ZERO);
        assert_eq!(animation.progress(t0), 1.0);
        assert!(animation.finished(t0));
    }

    #[test]
    fn registry_replaces_same_key_and_keeps_distinct_keys() {
        let t0 = Instant::now();
        let duration = Duration::from_millis(400);
        let mut registry = AnimationRegistry::new();

        registry.add(
            "TurnOn",
            Animation::new(t0, duration)
                .with_track(Prop::Stroke, Keyframes::scalar(&[0.0, 1.0], &[1.0, 0.0])),
        );
        registry.add(
            "TurnOff",
            Animation::new(t0, duration)
                .with_track(Prop::Stroke, Keyframes::scalar(&[0.0, 1.0], &[0.0, 1.0])),
        );
        assert_eq!(registry.len(), 2);

        // Same key replaces and moves to the end of the application order.
        registry.add(
            "TurnOn",
            Animation::new(t0, duration)
                .with_track(Prop::Stroke, Keyframes::scalar(&[0.0, 1.0], &[0.5, 0.5])),
        );
        assert_eq!(registry.len(), 2);

        let samples = registry.sample(t0 + duration);
        let last_stroke = samples
            .iter()
            .rev()
            .find(|(p, _)| *p == Prop::Stroke)
            .map(|(_, v)| *v);
        assert_eq!(last_stroke, Some(Value::Scalar(0.5)));
    }

    #[test]
    fn finished_animations_fill_forwards() {
        let t0 = Instant::now();
        let mut registry = AnimationRegistry::new();
        let to = Color::from_rgb8(87, 233, 129);

        registry.add(
            "Color",
            Animation::new(t0, Duration::from_millis(400)).with_track(
                Prop::Fill,
                Keyframes::color(&[0.0, 1.0], &[Color::from_rgb8(229, 229, 229), to]),
            ),
        );

        let long_after = t0 + Duration::from_secs(60);
        assert!(!registry.is_animating(long_after));
        assert_eq!(registry.sample(long_after), vec![(Prop::Fill, Value::Color(to))]);
    }
}
