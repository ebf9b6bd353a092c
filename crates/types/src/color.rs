//! Colour values with an alpha channel.
//!
//! Colours are written as `#RRGGBB` or `#RRGGBBAA` strings in configuration
//! documents, or as one of a small set of named system colours. An alpha
//! that eight bits cannot hold exactly serializes as
//! `{ "rgb": "#RRGGBB", "alpha": 0.3 }` so documents read back unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Error returned when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("colour '{0}' must start with '#' or be a known colour name")]
    UnknownName(String),
    #[error("colour '{0}' must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("colour '{0}' contains non-hex digits")]
    BadDigit(String),
}

/// An sRGB colour with a floating point alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const BLUE: Rgba = Rgba::rgb(0x00, 0x7A, 0xFF);
    pub const GRAY: Rgba = Rgba::rgb(0x8E, 0x8E, 0x93);
    pub const RED: Rgba = Rgba::rgb(0xFF, 0x3B, 0x30);
    pub const GREEN: Rgba = Rgba::rgb(0x34, 0xC7, 0x59);
    pub const ORANGE: Rgba = Rgba::rgb(0xFF, 0x95, 0x00);
    pub const YELLOW: Rgba = Rgba::rgb(0xFF, 0xCC, 0x00);
    pub const PURPLE: Rgba = Rgba::rgb(0xAF, 0x52, 0xDE);
    pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    /// Fully opaque colour from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Returns the same colour with its alpha multiplied by `factor`.
    pub fn opacity(self, factor: f32) -> Self {
        Self {
            alpha: (self.alpha * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Composites this colour over an opaque `background`, returning an opaque colour.
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
        Rgba::rgb(mix(self.r, background.r), mix(self.g, background.g), mix(self.b, background.b))
    }

    fn named(name: &str) -> Option<Rgba> {
        let color = match name {
            "blue" => Self::BLUE,
            "gray" | "grey" => Self::GRAY,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "orange" => Self::ORANGE,
            "yellow" => Self::YELLOW,
            "purple" => Self::PURPLE,
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "clear" => Self::BLACK.opacity(0.0),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Rgba::named(&trimmed.to_ascii_lowercase()).ok_or_else(|| ColorParseError::UnknownName(trimmed.to_string()));
        };
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::BadLength(trimmed.to_string()));
        }
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(trimmed.to_string()));
        }
        let channel = |start: usize| {
            hex.get(start..start + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigit(trimmed.to_string()))
        };
        let alpha = if hex.len() == 8 { channel(6)? as f32 / 255.0 } else { 1.0 };
        Ok(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            alpha,
        })
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RgbaRepr {
    Text(String),
    Channels { rgb: String, alpha: f32 },
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let eight_bit = (self.alpha * 255.0).round() / 255.0;
        let repr = if eight_bit == self.alpha {
            RgbaRepr::Text(self.to_string())
        } else {
            RgbaRepr::Channels {
                rgb: Rgba { alpha: 1.0, ..*self }.to_string(),
                alpha: self.alpha,
            }
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RgbaRepr::deserialize(deserializer)? {
            RgbaRepr::Text(text) => text.parse().map_err(de::Error::custom),
            RgbaRepr::Channels { rgb, alpha } => {
                let color: Rgba = rgb.parse().map_err(de::Error::custom)?;
                Ok(color.opacity(alpha))
            }
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", (self.alpha * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_alpha() {
        assert_eq!("#007AFF".parse::<Rgba>().unwrap(), Rgba::BLUE);
        let translucent: Rgba = "#FF000080".parse().unwrap();
        assert_eq!((translucent.r, translucent.g, translucent.b), (0xFF, 0, 0));
        assert!((translucent.alpha - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn parses_named_colours_case_insensitively() {
        assert_eq!("Gray".parse::<Rgba>().unwrap(), Rgba::GRAY);
        assert_eq!("clear".parse::<Rgba>().unwrap().alpha, 0.0);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!("#12345".parse::<Rgba>(), Err(ColorParseError::BadLength(_))));
        assert!(matches!("#GG0000".parse::<Rgba>(), Err(ColorParseError::BadDigit(_))));
        assert!(matches!("#+F+F+F".parse::<Rgba>(), Err(ColorParseError::BadDigit(_))));
        assert!(matches!("mauve".parse::<Rgba>(), Err(ColorParseError::UnknownName(_))));
    }

    #[test]
    fn opacity_multiplies_alpha() {
        let faded = Rgba::GRAY.opacity(0.5).opacity(0.5);
        assert_eq!(faded.alpha, 0.25);
        assert_eq!(Rgba::BLUE.opacity(3.0).alpha, 1.0);
    }

    #[test]
    fn over_blends_against_background() {
        let half_black = Rgba::BLACK.opacity(0.5);
        assert_eq!(half_black.over(Rgba::WHITE), Rgba::rgb(128, 128, 128));
        assert_eq!(Rgba::RED.over(Rgba::WHITE), Rgba::RED);
    }

    #[test]
    fn display_omits_alpha_when_opaque() {
        assert_eq!(Rgba::BLUE.to_string(), "#007AFF");
        assert_eq!(Rgba::BLACK.opacity(0.0).to_string(), "#00000000");
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Rgba::GREEN).expect("serialize colour");
        assert_eq!(json, "\"#34C759\"");
        let back: Rgba = serde_json::from_str("\"orange\"").expect("deserialize colour");
        assert_eq!(back, Rgba::ORANGE);
    }

    #[test]
    fn fractional_alpha_survives_serde() {
        let faded = Rgba::GRAY.opacity(0.3);
        let json = serde_json::to_value(faded).expect("serialize colour");
        assert_eq!(json["rgb"], "#8E8E93");
        let back: Rgba = serde_json::from_value(json).expect("deserialize colour");
        assert_eq!(back, faded);

        let half = Rgba::BLACK.opacity(128.0 / 255.0);
        assert_eq!(serde_json::to_string(&half).expect("serialize colour"), "\"#00000080\"");
    }
}
