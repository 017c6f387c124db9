// File: src/color_utils.rs
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A 24-bit RGB color, the form tag colors take once parsed from the
/// `"#rrggbb"` strings stored on tag records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Why a hex color string failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidLength(usize),
    InvalidDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "empty color value"),
            ColorParseError::InvalidLength(n) => write!(f, "expected 6 hex digits, got {n}"),
            ColorParseError::InvalidDigit(c) => write!(f, "invalid hex digit '{c}'"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parses `"#rrggbb"` or `"rrggbb"`, case-insensitive.
    ///
    /// Malformed values are rejected rather than coerced: anything that is
    /// not exactly six hex digits after the optional `#` is an error.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.is_empty() {
            return Err(ColorParseError::Empty);
        }
        let nibble = |c: char| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(ColorParseError::InvalidDigit(c))
        };
        let digits = hex.chars().map(nibble).collect::<Result<Vec<_>, _>>()?;
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        Ok(Color {
            r: digits[0] << 4 | digits[1],
            g: digits[2] << 4 | digits[3],
            b: digits[4] << 4 | digits[5],
        })
    }

    /// Perceived brightness in the 0..=255 range, weighting the channels by
    /// how strongly the eye responds to them (0.299 / 0.587 / 0.114).
    pub fn brightness(self) -> f64 {
        f64::from(self.r) * 0.299 + f64::from(self.g) * 0.587 + f64::from(self.b) * 0.114
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Distance from pure white below which a background counts as light.
const CONTRAST_THRESHOLD: f64 = 105.0;

/// Picks black or white text for the given background color.
///
/// A background is "light" when pure white is less than 105 brightness
/// points away, and light backgrounds get black text. Everything else gets
/// white text, so the result is always one of the two extremes.
pub fn ideal_text_color(background: Color) -> Color {
    let delta = 255.0 - background.brightness();
    if delta < CONTRAST_THRESHOLD {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// String-level variant for callers holding raw hex values, which is how tag
/// records store their color. Returns exactly `"#000000"` or `"#ffffff"`.
pub fn ideal_text_color_hex(background: &str) -> Result<&'static str, ColorParseError> {
    let color = background.parse::<Color>()?;
    Ok(if ideal_text_color(color) == Color::BLACK {
        "#000000"
    } else {
        "#ffffff"
    })
}

/// Derives a deterministic pastel color from a tag name.
///
/// Tags whose color was never picked in the colorpicker still need one; the
/// same name always maps to the same hue, with saturation and lightness kept
/// in a range that reads well behind label text.
pub fn generate_color(tag: &str) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    tag.hash(&mut hasher);
    let hash = hasher.finish();

    // Hue: 0-360 degrees
    let h = (hash % 360) as f32;

    // Saturation: 40% - 90%
    let s = 0.40 + ((hash >> 16) % 51) as f32 / 100.0;

    // Lightness: 65% - 90%
    let l = 0.65 + ((hash >> 32) % 26) as f32 / 100.0;

    let (r, g, b) = hsl_to_rgb(h, s, l);
    Color {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}

/// Helper: HSL to RGB conversion
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}
