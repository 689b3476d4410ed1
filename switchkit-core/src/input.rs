//! # Input State & Tap Recognition
//!
//! Controls consume per-frame [`InputState`] snapshots assembled by the host
//! event loop from winit events. A [`TapRecognizer`] turns a press inside the
//! control's frame followed by a release inside the frame into a tap.

use nalgebra::Vector2;
use vello::kurbo::Rect;

use crate::window::{ElementState, MouseButton};

/// A snapshot of the pointer input relevant to one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current cursor position in logical coordinates, if the cursor is
    /// inside the window.
    pub cursor_pos: Option<Vector2<f64>>,
    /// Button transitions that happened this frame, in order.
    pub buttons: Vec<(MouseButton, ElementState)>,
}

impl InputState {
    /// Create an empty input snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cursor position and return self.
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor_pos = Some(Vector2::new(x, y));
        self
    }

    /// Append a left-button press and return self.
    pub fn with_press(mut self) -> Self {
        self.buttons.push((MouseButton::Left, ElementState::Pressed));
        self
    }

    /// Append a left-button release and return self.
    pub fn with_release(mut self) -> Self {
        self.buttons
            .push((MouseButton::Left, ElementState::Released));
        self
    }
}

/// Recognizes a tap: a left-button press inside `bounds` followed by a
/// release inside `bounds`.
///
/// A control owns exactly one recognizer at a time and replaces it when its
/// view is rebuilt, discarding any in-flight press.
#[derive(Debug, Clone, Default)]
pub struct TapRecognizer {
    pressed_inside: bool,
}

impl TapRecognizer {
    /// Create a recognizer with no press in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any in-flight press.
    pub fn reset(&mut self) {
        self.pressed_inside = false;
    }

    /// Feed one input snapshot and report whether a tap completed in it.
    pub fn process(&mut self, input: &InputState, bounds: Rect) -> bool {
        let in_bounds = input
            .cursor_pos
            .map(|cursor| bounds.contains((cursor.x, cursor.y)))
            .unwrap_or(false);

        let mut tapped = false;
        for (button, state) in &input.buttons {
            if *button != MouseButton::Left {
                continue;
            }
            match state {
                ElementState::Pressed => {
                    self.pressed_inside = in_bounds;
                },
                ElementState::Released => {
                    if self.pressed_inside && in_bounds {
                        tapped = true;
                    }
                    self.pressed_inside = false;
                },
            }
        }
        tapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 80.0, 40.0)
    }

    #[test]
    fn press_and_release_inside_is_a_tap() {
        let mut tap = TapRecognizer::new();
        assert!(!tap.process(&InputState::new().with_cursor(40.0, 20.0).with_press(), bounds()));
        assert!(tap.process(&InputState::new().with_cursor(40.0, 20.0).with_release(), bounds()));
    }

    #[test]
    fn release_outside_is_not_a_tap() {
        let mut tap = TapRecognizer::new();
        tap.process(&InputState::new().with_cursor(40.0, 20.0).with_press(), bounds());
        assert!(!tap.process(&InputState::new().with_cursor(200.0, 20.0).with_release(), bounds()));
        // The aborted press must not make a later release count.
        assert!(!tap.process(&InputState::new().with_cursor(40.0, 20.0).with_release(), bounds()));
    }

    #[test]
    fn release_without_press_is_not_a_tap() {
        let mut tap = TapRecognizer::new();
        assert!(!tap.process(&InputState::new().with_cursor(40.0, 20.0).with_release(), bounds()));
    }

    #[test]
    fn press_and_release_in_one_frame_is_a_tap() {
        let mut tap = TapRecognizer::new();
        let frame = InputState::new().with_cursor(40.0, 20.0).with_press().with_release();
        assert!(tap.process(&frame, bounds()));
    }

    #[test]
    fn reset_discards_in_flight_press() {
        let mut tap = TapRecognizer::new();
        tap.process(&InputState::new().with_cursor(40.0, 20.0).with_press(), bounds());
        tap.reset();
        assert!(!tap.process(&InputState::new().with_cursor(40.0, 20.0).with_release(), bounds()));
    }

    #[test]
    fn missing_cursor_never_hits() {
        let mut tap = TapRecognizer::new();
        tap.process(&InputState::new().with_press(), bounds());
        assert!(!tap.process(&InputState::new().with_release(), bounds()));
    }
}
