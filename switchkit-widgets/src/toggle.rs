use std::time::{Duration, Instant};

use nalgebra::Vector2;
use switchkit_core::input::{InputState, TapRecognizer};
use switchkit_core::update::Update;
use switchkit_core::vg::kurbo::{Affine, Rect};
use switchkit_core::vgi::Graphics;

/// Callback invoked with the new value when the switch state changes.
pub type ChangeHook = Box<dyn Fn(bool) + Send + Sync>;

/// What a skin needs to know about its control when building or reacting to
/// a state change.
#[derive(Debug, Clone)]
pub struct SkinContext {
    /// The control's size in logical units.
    pub size: Vector2<f64>,
    /// Duration of an animated state transition.
    pub duration: Duration,
    /// The control's current boolean state.
    pub is_on: bool,
}

/// The visual variant attached to a [`ToggleControl`].
///
/// The base control owns the boolean state and the gesture; the skin owns
/// layers and animations. `build` is called whenever the view is (re)built
/// and must leave the visuals matching `ctx.is_on`; `state_changed` is called
/// from the single toggle path with the new value.
pub trait SwitchSkin {
    /// Rebuild all retained visuals from scratch for the given context.
    fn build(&mut self, ctx: &SkinContext);

    /// React to a state change, animating when `animate` is set.
    fn state_changed(&mut self, ctx: &SkinContext, is_on: bool, animate: bool);

    /// Advance animations to `now`.
    fn tick(&mut self, now: Instant) -> Update {
        let _ = now;
        Update::empty()
    }

    /// Draw the skin. `base` maps local coordinates into the host scene.
    fn render(&mut self, graphics: &mut dyn Graphics, base: Affine) {
        let _ = (graphics, base);
    }
}

/// A skin that draws nothing, for bare state-and-gesture controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSkin;

impl SwitchSkin for PlainSkin {
    fn build(&mut self, _ctx: &SkinContext) {}

    fn state_changed(&mut self, _ctx: &SkinContext, _is_on: bool, _animate: bool) {}
}

/// A gesture-driven boolean control.
///
/// The control owns the authoritative `is_on` state, recognizes taps inside
/// its frame and notifies its skin and the host on every change. The state
/// only ever flips through the single internal toggle routine, triggered by a
/// tap or by [`set_on`](ToggleControl::set_on).
///
/// The default control is 80×40 logical units and starts in the on state.
pub struct ToggleControl<S: SwitchSkin> {
    is_on: bool,
    animate_duration: Duration,
    on_change: Option<ChangeHook>,
    frame: Rect,
    tap: TapRecognizer,
    skin: S,
    disabled: bool,
    generation: u64,
}

impl<S: SwitchSkin> ToggleControl<S> {
    /// Create a control with the given skin and the default 80×40 frame.
    pub fn with_skin(skin: S) -> Self {
        let mut control = Self {
            is_on: true,
            animate_duration: Duration::from_millis(400),
            on_change: None,
            frame: Rect::new(0.0, 0.0, 80.0, 40.0),
            tap: TapRecognizer::new(),
            skin,
            disabled: false,
            generation: 0,
        };
        control.reset_view();
        control
    }

    pub(crate) fn apply_with(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Set the control's frame and return self.
    pub fn with_frame(self, frame: Rect) -> Self {
        self.apply_with(|this| {
            this.set_frame(frame);
        })
    }

    /// Set the initial state and return self.
    pub fn with_on(self, on: bool) -> Self {
        self.apply_with(|this| {
            if this.is_on != on {
                this.is_on = on;
                this.reset_view();
            }
        })
    }

    /// Set the animated transition duration and return self.
    pub fn with_duration(self, duration: Duration) -> Self {
        self.apply_with(|this| this.animate_duration = duration)
    }

    /// Set a callback to be called when the state changes and return self.
    pub fn with_on_change(self, hook: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.apply_with(|this| this.on_change = Some(Box::new(hook)))
    }

    /// Set whether the control ignores taps and return self.
    pub fn with_disabled(self, disabled: bool) -> Self {
        self.apply_with(|this| this.disabled = disabled)
    }

    /// Whether the switch is on.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// The control's frame in logical coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Duration of an animated state transition.
    pub fn animate_duration(&self) -> Duration {
        self.animate_duration
    }

    /// Set the duration of animated state transitions.
    pub fn set_animate_duration(&mut self, duration: Duration) {
        self.animate_duration = duration;
    }

    /// Replace the change callback.
    pub fn set_on_change(&mut self, hook: impl Fn(bool) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// Whether the control ignores taps.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Set whether the control ignores taps. Programmatic changes through
    /// [`set_on`](ToggleControl::set_on) are unaffected.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The skin driving this control's visuals.
    pub fn skin(&self) -> &S {
        &self.skin
    }

    pub(crate) fn skin_mut(&mut self) -> &mut S {
        &mut self.skin
    }

    /// How many times the view has been built. Bumped once per rebuild.
    pub fn view_generation(&self) -> u64 {
        self.generation
    }

    /// Set the state, running the normal change path unless `value` already
    /// matches. With `animate` unset the skin snaps straight to the end
    /// state.
    pub fn set_on(&mut self, value: bool, animate: bool) -> Update {
        if value == self.is_on {
            return Update::empty();
        }
        self.change_value(animate)
    }

    /// Feed one input snapshot; a completed tap toggles the control.
    pub fn handle_input(&mut self, input: &InputState) -> Update {
        if self.disabled {
            return Update::empty();
        }
        if self.tap.process(input, self.frame) {
            self.change_value(true)
        } else {
            Update::empty()
        }
    }

    /// Move or resize the control. A size change rebuilds the whole view;
    /// a pure move only requests a redraw; an identical frame is a no-op.
    pub fn set_frame(&mut self, frame: Rect) -> Update {
        let size_changed = frame.width() != self.frame.width()
            || frame.height() != self.frame.height();
        let moved = frame.origin() != self.frame.origin();
        self.frame = frame;

        if size_changed {
            self.reset_view();
            Update::DRAW | Update::LAYOUT
        } else if moved {
            Update::DRAW
        } else {
            Update::empty()
        }
    }

    /// Advance the skin's animations to `now`.
    pub fn tick(&mut self, now: Instant) -> Update {
        self.skin.tick(now)
    }

    /// Draw the control at its frame.
    pub fn render(&mut self, graphics: &mut dyn Graphics) {
        let base = Affine::translate((self.frame.x0, self.frame.y0));
        self.skin.render(graphics, base);
    }

    // The sole state mutation path.
    fn change_value(&mut self, animate: bool) -> Update {
        self.is_on = !self.is_on;
        log::debug!("switch toggled to {}", self.is_on);

        if let Some(hook) = &self.on_change {
            hook(self.is_on);
        }
        let ctx = self.skin_context();
        self.skin.state_changed(&ctx, self.is_on, animate);

        Update::DRAW | Update::EVAL
    }

    pub(crate) fn reset_view(&mut self) {
        self.tap = TapRecognizer::new();
        self.generation += 1;
        log::trace!("rebuilding switch view (generation {})", self.generation);
        let ctx = self.skin_context();
        self.skin.build(&ctx);
    }

    fn skin_context(&self) -> SkinContext {
        SkinContext {
            size: Vector2::new(self.frame.width(), self.frame.height()),
            duration: self.animate_duration,
            is_on: self.is_on,
        }
    }
}

impl Default for ToggleControl<PlainSkin> {
    fn default() -> Self {
        Self::with_skin(PlainSkin)
    }
}
