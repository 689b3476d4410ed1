#![warn(missing_docs)]

//! Core library for switchkit => See the `switchkit` crate.
//!
//! Contains the rendering, input and animation infrastructure the widgets
//! are built on.

pub use vello as vg;

/// Contains useful types for interacting with winit.
pub mod window {
    pub use winit::event::{ElementState, MouseButton};
}

/// Contains the keyframe animation engine and the keyed animation registry.
pub mod animation;

/// Contains input state snapshots and tap gesture recognition.
pub mod input;

/// Contains the retained shape layer and path trimming.
pub mod layer;

/// Contains the update mode bitflag.
pub mod update;

/// Contains the vector graphics interface abstraction.
pub mod vgi;
