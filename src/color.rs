// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::error::{OverlayError, Result};

/// Opaque RGB colour used for strokes and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Keypoints, skeleton and heatmap colour.
    pub const AQUA: Self = Self(0, 255, 255);
    /// Bounding box colour.
    pub const RED: Self = Self(255, 0, 0);
    pub const GREEN: Self = Self(0, 128, 0);
    pub const LIME: Self = Self(0, 255, 0);
    pub const BLUE: Self = Self(0, 0, 255);
    pub const YELLOW: Self = Self(255, 255, 0);
    pub const ORANGE: Self = Self(255, 165, 0);
    pub const FUCHSIA: Self = Self(255, 0, 255);
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLACK: Self = Self(0, 0, 0);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Fully opaque pixel value for raster surfaces.
    #[must_use]
    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.0, self.1, self.2, 255])
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "aqua" | "cyan" => Self::AQUA,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "lime" => Self::LIME,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "orange" => Self::ORANGE,
            "fuchsia" | "magenta" => Self::FUCHSIA,
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            _ => return None,
        };
        Some(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Parses CSS-style colours: a handful of keywords, `#rgb` and `#rrggbb`.
impl FromStr for Color {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(color) = Self::named(&s) {
            return Ok(color);
        }

        let invalid = || OverlayError::ConfigError(format!("invalid colour '{s}'"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);

        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self(
                    short(0).map_err(|_| invalid())?,
                    short(1).map_err(|_| invalid())?,
                    short(2).map_err(|_| invalid())?,
                ))
            }
            6 => Ok(Self(
                channel(0..2).map_err(|_| invalid())?,
                channel(2..4).map_err(|_| invalid())?,
                channel(4..6).map_err(|_| invalid())?,
            )),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!("aqua".parse::<Color>().unwrap(), Color::AQUA);
        assert_eq!(" Red ".parse::<Color>().unwrap(), Color::RED);
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!("#e61d5f".parse::<Color>().unwrap(), Color(0xe6, 0x1d, 0x5f));
        assert_eq!("#0ff".parse::<Color>().unwrap(), Color::AQUA);
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("00ffff".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_hex() {
        assert_eq!(Color::AQUA.to_string(), "#00ffff");
        assert_eq!(Color::RED.to_rgba(), Rgba([255, 0, 0, 255]));
    }
}
