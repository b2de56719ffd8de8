//! Display colors for markers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Self = Self::from_hex(0xff_00_00);
    pub const GREEN: Self = Self::from_hex(0x00_ff_00);

    /// Build a color from a packed `0xRRGGBB` value. The top byte is ignored.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Returns the packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#rrggbb`, `0xrrggbb` or bare `rrggbb`.
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |detail: String| Error::InvalidColor {
            input: s.to_string(),
            detail,
        };

        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 {
            return Err(invalid(format!(
                "expected 6 hex digits, got {}",
                digits.len()
            )));
        }

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid(format!("non-hex digit in {digits:?}")));
        }

        let hex = u32::from_str_radix(digits, 16).map_err(|e| invalid(e.to_string()))?;
        Ok(Self::from_hex(hex))
    }
}
