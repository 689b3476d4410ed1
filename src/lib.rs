#![warn(missing_docs)]

//! An animated line-to-knob toggle switch for vello-based UIs.
//!
//! The base [`ToggleControl`](widgets::ToggleControl) owns boolean state and
//! tap recognition; the [`LineKnobSwitch`](widgets::LineKnobSwitch) skin
//! morphs a stroked line into a circular knob while crossfading the track
//! color.
//!
//! ```no_run
//! use switchkit::prelude::*;
//!
//! let mut switch = LineKnobSwitch::new()
//!     .with_theme(SwitchTheme::default())
//!     .with_on_change(|on| println!("switch is now {on}"));
//! switch.set_on(false, true);
//! ```

pub use nalgebra as math;
pub use vello::peniko as color;

pub use switchkit_core as core;
pub use switchkit_theme as theme;
pub use switchkit_widgets as widgets;

/// A "prelude" for users of the switchkit crates.
///
/// Importing this module brings into scope the most common types needed to
/// embed a switch into an application.
///
/// ```rust
/// use switchkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::animation::{Animation, AnimationRegistry, Keyframes, Value};
    pub use crate::core::input::InputState;
    pub use crate::core::update::Update;
    pub use crate::core::vg::kurbo::{Affine, Rect};
    pub use crate::core::vg::peniko::Color;
    pub use crate::core::vgi::{shape_to_path, Graphics};
    pub use crate::core::window::{ElementState, MouseButton};

    // Theme
    pub use crate::theme::SwitchTheme;

    // Math
    pub use nalgebra::Vector2;

    // Widgets
    pub use crate::widgets::{
        LineKnobSkin, LineKnobSwitch, PlainSkin, SkinContext, SwitchSkin, ToggleControl,
    };
}
