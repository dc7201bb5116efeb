//! Color input parsing and TW color code packing.
//!
//! Two textual forms are accepted:
//! * `#RRGGBB` and `#AARRGGBB` hex
//! * `r,g,b` and `r,g,b,a` decimal lists (whitespace around tokens is ignored)
//!
//! Channels `r`, `g`, `b` live in `[0, 255]` and alpha in `[0, 1]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed color, before packing.
///
/// Only produced by [`parse_color`], so the channel ranges always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalColor {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl CanonicalColor {
    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Alpha in `[0, 1]`
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Pack into a TW color code. Same as [`encode_color`].
    pub fn encode(&self) -> PackedColorCode {
        encode_color(self)
    }

    /// Build a color from channel values, or `None` when a channel is out of range.
    fn checked(r: f64, g: f64, b: f64, a: f64) -> Option<Self> {
        let channel = 0.0..=255.0;
        if channel.contains(&r) && channel.contains(&g) && channel.contains(&b) && (0.0..=1.0).contains(&a) {
            Some(Self { r, g, b, a })
        } else {
            None
        }
    }
}

/// 32-bit TW color code, laid out as `AARRGGBB` from most to least significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedColorCode(pub u32);

impl PackedColorCode {
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Channels as `[r, g, b, a]`, the order image buffers expect.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl From<PackedColorCode> for u32 {
    fn from(code: PackedColorCode) -> Self {
        code.0
    }
}

impl fmt::Display for PackedColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Parse a user-supplied color string.
///
/// Returns `None` for missing, empty, malformed or out-of-range input; callers
/// decide whether that means "not supplied" or "invalid".
pub fn parse_color(input: Option<&str>) -> Option<CanonicalColor> {
    let input = input?;
    if input.is_empty() {
        return None;
    }

    match input.strip_prefix('#') {
        Some(digits) => parse_hex(digits),
        None => parse_decimal(input),
    }
}

fn parse_hex(digits: &str) -> Option<CanonicalColor> {
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte_at = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok().map(f64::from);

    match digits.len() {
        6 => CanonicalColor::checked(byte_at(0)?, byte_at(2)?, byte_at(4)?, 1.0),
        8 => {
            let a = byte_at(0)? / 255.0;
            CanonicalColor::checked(byte_at(2)?, byte_at(4)?, byte_at(6)?, a)
        }
        _ => None,
    }
}

fn parse_decimal(input: &str) -> Option<CanonicalColor> {
    let values = input
        .split(',')
        .map(|token| token.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match values[..] {
        [r, g, b] => CanonicalColor::checked(r, g, b, 1.0),
        [r, g, b, a] => CanonicalColor::checked(r, g, b, a),
        _ => None,
    }
}

/// Pack a color into its TW color code.
///
/// Channels are clamped to `[0, 255]` (alpha scaled by 255 first) and rounded
/// half away from zero before packing.
pub fn encode_color(color: &CanonicalColor) -> PackedColorCode {
    let byte = |v: f64| v.clamp(0.0, 255.0).round() as u32;

    let a = byte(color.a * 255.0);
    let r = byte(color.r);
    let g = byte(color.g);
    let b = byte(color.b);

    PackedColorCode((a << 24) | (r << 16) | (g << 8) | b)
}
