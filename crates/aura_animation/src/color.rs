//! RGB color triples and theme palettes

use crate::error::{MotionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Used when a hex string cannot be parsed
    pub const FALLBACK: Rgb = Rgb::new(26, 26, 46);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(MotionError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| MotionError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parse a hex color, falling back to [`Rgb::FALLBACK`]
    pub fn from_hex_or_fallback(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::FALLBACK)
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgb(r, g, b)`
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// The three colors that drive the dynamic theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

impl Palette {
    pub const fn new(primary: Rgb, secondary: Rgb, accent: Rgb) -> Self {
        Self {
            primary,
            secondary,
            accent,
        }
    }

    /// Build a palette from hex strings, each falling back independently
    pub fn from_hex_or_fallback(primary: &str, secondary: &str, accent: &str) -> Self {
        Self::new(
            Rgb::from_hex_or_fallback(primary),
            Rgb::from_hex_or_fallback(secondary),
            Rgb::from_hex_or_fallback(accent),
        )
    }

    /// Interpolate every color of the palette
    pub fn lerp(&self, other: &Palette, t: f64) -> Palette {
        Palette::new(
            self.primary.lerp(other.primary, t),
            self.secondary.lerp(other.secondary, t),
            self.accent.lerp(other.accent, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#e94560"), Ok(Rgb::new(233, 69, 96)));
        assert_eq!(Rgb::from_hex("16213E"), Ok(Rgb::new(22, 33, 62)));
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert_eq!(Rgb::from_hex_or_fallback("nope"), Rgb::FALLBACK);
    }

    #[test]
    fn test_lerp_rounds_channels() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 10, 3);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 5, 2));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(Rgb::new(26, 26, 46).to_css(), "rgb(26, 26, 46)");
        assert_eq!(Rgb::new(26, 26, 46).to_hex(), "#1a1a2e");
    }

    #[test]
    fn test_palette_deserializes_from_hex() {
        let palette: Palette = toml::from_str(
            r##"
            primary = "#1a1a2e"
            secondary = "#16213e"
            accent = "#e94560"
            "##,
        )
        .unwrap();
        assert_eq!(palette.accent, Rgb::new(233, 69, 96));

        let bad: std::result::Result<Palette, _> = toml::from_str(
            r##"
            primary = "#1a1a2e"
            secondary = "blue"
            accent = "#e94560"
            "##,
        );
        assert!(bad.is_err());
    }
}
