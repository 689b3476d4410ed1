//! Custom serialization helpers for vello::peniko::Color

use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let components = color.components;
    let r = (components[0] * 255.0).round() as u8;
    let g = (components[1] * 255.0).round() as u8;
    let b = (components[2] * 255.0).round() as u8;
    let a = (components[3] * 255.0).round() as u8;
    let hex = if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    };
    serializer.serialize_str(&hex)
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_hex_color(&hex).map_err(Error::custom)
}

fn parse_hex_color(hex: &str) -> Result<Color, String> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;
        Ok(Color::from_rgb8(r, g, b))
    } else if hex.len() == 8 {
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;
        let a = u8::from_str_radix(&hex[6..8], 16).map_err(|_| "Invalid hex color")?;
        Ok(Color::from_rgba8(r, g, b, a))
    } else {
        Err("Hex color must be 6 or 8 characters".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_hex_color;
    use vello::peniko::Color;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            parse_hex_color("#57e981").unwrap(),
            Color::from_rgb8(0x57, 0xe9, 0x81)
        );
    }

    #[test]
    fn parses_eight_digit_hex() {
        assert_eq!(
            parse_hex_color("e5e5e580").unwrap(),
            Color::from_rgba8(0xe5, 0xe5, 0xe5, 0x80)
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_hex_color("#abcd").is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(parse_hex_color("#zzzzzz").is_err());
    }
}
