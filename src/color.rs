//! Particle and guide colors.
//!
//! Colors are written as CSS-style strings in configuration and parsed once
//! when the kaleidoscope is built.
//!
//! ```ignore
//! let c: Color = "#2E86AB".parse()?;
//! let gray = Color::parse("rgb(150, 150, 150)")?;
//! ```

use std::str::FromStr;

use crate::error::ColorError;

/// Default particle palette.
pub const DEFAULT_PALETTE: [&str; 5] = ["#FFD1B9", "#564138", "#2E86AB", "#F5F749", "#F24236"];

/// Default color of the symmetry guide rays.
pub const DEFAULT_GUIDE_COLOR: &str = "rgb(150, 150, 150)";

/// Default surface background.
pub const DEFAULT_BACKGROUND: &str = "white";

/// RGBA color with channels in 0.0-1.0, stored in sRGB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color from sRGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a CSS-style color string.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let err = || ColorError {
            input: input.to_string(),
        };
        let s = input.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba") {
            return parse_channels(args, true).ok_or_else(err);
        }
        if let Some(args) = function_args(&lower, "rgb") {
            return parse_channels(args, false).ok_or_else(err);
        }

        named(&lower).ok_or_else(err)
    }

    /// Quantize to 8-bit RGBA for raster output.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Convert the color channels to linear space for sRGB render targets.
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        ]
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => {
            let c = Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?);
            Some(Color {
                a: byte(6)? as f32 / 255.0,
                ..c
            })
        }
        _ => None,
    }
}

fn parse_channels(args: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |s: &str| -> Option<f32> {
        let v: f32 = s.parse().ok()?;
        (0.0..=255.0).contains(&v).then_some(v / 255.0)
    };

    let a = if with_alpha {
        let a: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        a
    } else {
        1.0
    };

    Some(Color::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
}

fn named(name: &str) -> Option<Color> {
    match name {
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        "gray" | "grey" => Some(Color::from_rgb8(128, 128, 128)),
        "red" => Some(Color::from_rgb8(255, 0, 0)),
        "green" => Some(Color::from_rgb8(0, 128, 0)),
        "blue" => Some(Color::from_rgb8(0, 0, 255)),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_long() {
        let c = Color::parse("#2E86AB").unwrap();
        assert_eq!(c.to_rgba8(), [0x2E, 0x86, 0xAB, 255]);
    }

    #[test]
    fn test_parse_hex_short_and_alpha() {
        assert_eq!(Color::parse("#fff").unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::parse("#00000080").unwrap().to_rgba8(), [0, 0, 0, 128]);
    }

    #[test]
    fn test_parse_rgb_function() {
        let c = Color::parse(DEFAULT_GUIDE_COLOR).unwrap();
        assert_eq!(c.to_rgba8(), [150, 150, 150, 255]);

        let c = Color::parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("White").unwrap(), Color::WHITE);
        assert_eq!("transparent".parse::<Color>().unwrap().a, 0.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#12", "#ggg", "rgb(1, 2)", "rgb(300, 0, 0)", "rgba(0, 0, 0, 2)", "teal"] {
            let err = Color::parse(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn test_default_palette_parses() {
        for c in DEFAULT_PALETTE {
            assert!(Color::parse(c).is_ok(), "{} should parse", c);
        }
    }

    #[test]
    fn test_to_linear_endpoints() {
        assert_eq!(Color::BLACK.to_linear(), [0.0, 0.0, 0.0, 1.0]);
        let white = Color::WHITE.to_linear();
        assert!((white[0] - 1.0).abs() < 1e-5);
    }
}
