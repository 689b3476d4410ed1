#![warn(missing_docs)]

//! Widgets for switchkit => See the `switchkit` crate.

/// Contains the line-to-knob switch skin and its animation logic.
pub mod line_knob;

/// Contains the base toggle control and the skin extension point.
pub mod toggle;

pub use line_knob::{LineKnobSkin, LineKnobSwitch, SwitchProperty};
pub use toggle::{ChangeHook, PlainSkin, SkinContext, SwitchSkin, ToggleControl};
