use std::path::Path;

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::error::{ThemeError, ThemeResult};

/// The color and line-weight configuration of a line-to-knob switch.
///
/// A theme is an immutable value handed to the control at construction;
/// replacing it rebuilds the control's render tree.
///
/// Themes serialize to TOML with hex-string colors:
///
/// ```toml
/// on_color = "#57e981"
/// off_color = "#e5e5e5"
/// line_color = "#cccccc"
/// knob_color = "#ffffff"
/// line_thickness = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchTheme {
    /// Track fill color while the switch is on.
    #[serde(with = "crate::serde_color")]
    pub on_color: Color,
    /// Track fill color while the switch is off.
    #[serde(with = "crate::serde_color")]
    pub off_color: Color,
    /// Track outline color.
    #[serde(with = "crate::serde_color")]
    pub line_color: Color,
    /// Knob/line stroke color.
    #[serde(with = "crate::serde_color")]
    pub knob_color: Color,
    /// Line weight relative to the control size; the effective stroke width
    /// is `line_thickness * min(width, height) / 100`.
    pub line_thickness: f64,
}

impl Default for SwitchTheme {
    fn default() -> Self {
        Self {
            on_color: Color::from_rgb8(87, 233, 129),
            off_color: Color::from_rgb8(229, 229, 229),
            line_color: Color::from_rgb8(204, 204, 204),
            knob_color: Color::WHITE,
            line_thickness: 10.0,
        }
    }
}

impl SwitchTheme {
    /// The track fill color for a boolean state.
    pub fn fill_color(&self, is_on: bool) -> Color {
        if is_on {
            self.on_color
        } else {
            self.off_color
        }
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(input: &str) -> ThemeResult<Self> {
        toml::from_str(input).map_err(|err| ThemeError::Serialization(err.to_string()))
    }

    /// Serialize the theme to a TOML string.
    pub fn to_toml_string(&self) -> ThemeResult<String> {
        toml::to_string_pretty(self).map_err(|err| ThemeError::Serialization(err.to_string()))
    }

    /// Load a theme from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|err| ThemeError::parse_error(path, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_palette() {
        let theme = SwitchTheme::default();
        assert_eq!(theme.on_color, Color::from_rgb8(87, 233, 129));
        assert_eq!(theme.off_color, Color::from_rgb8(229, 229, 229));
        assert_eq!(theme.line_color, Color::from_rgb8(204, 204, 204));
        assert_eq!(theme.knob_color, Color::WHITE);
        assert_eq!(theme.line_thickness, 10.0);
    }

    #[test]
    fn fill_color_selects_by_state() {
        let theme = SwitchTheme::default();
        assert_eq!(theme.fill_color(true), theme.on_color);
        assert_eq!(theme.fill_color(false), theme.off_color);
    }

    #[test]
    fn toml_round_trip() {
        let theme = SwitchTheme::default();
        let encoded = theme.to_toml_string().unwrap();
        let decoded = SwitchTheme::from_toml_str(&encoded).unwrap();
        assert_eq!(decoded, theme);
    }

    #[test]
    fn parses_explicit_toml() {
        let theme = SwitchTheme::from_toml_str(
            r##"
            on_color = "#57e981"
            off_color = "#e5e5e5"
            line_color = "#cccccc"
            knob_color = "#ffffff"
            line_thickness = 8.5
            "##,
        )
        .unwrap();
        assert_eq!(theme.on_color, Color::from_rgb8(0x57, 0xe9, 0x81));
        assert_eq!(theme.line_thickness, 8.5);
    }

    #[test]
    fn rejects_bad_color() {
        let result = SwitchTheme::from_toml_str(
            r##"
            on_color = "#notahex"
            off_color = "#e5e5e5"
            line_color = "#cccccc"
            knob_color = "#ffffff"
            line_thickness = 10.0
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = SwitchTheme::load("/nonexistent/switch-theme.toml");
        assert!(matches!(result, Err(ThemeError::Io(_))));
    }
}
