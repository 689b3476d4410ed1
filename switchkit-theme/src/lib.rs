#![warn(missing_docs)]

//! Themes & styling for switchkit => See the `switchkit` crate.

/// Contains the theming error types.
pub mod error;

/// Custom serialization helpers for `vello::peniko::Color`.
pub mod serde_color;

/// Contains the switch theme.
pub mod switch;

pub use error::{ThemeError, ThemeResult};
pub use switch::SwitchTheme;
