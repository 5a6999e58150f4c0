#![forbid(unsafe_code)]

//! Packed RGBA colors with hex string parsing.
//!
//! Task colors arrive as CSS-style hex strings (`"#4E79A7"`), so the
//! serde form is the string, not the packed integer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A color packed as 0xRRGGBBAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Parse a `#RGB`, `#RRGGBB`, or `#RRGGBBAA` hex string.
    ///
    /// Digits are case-insensitive; the three-digit form expands each
    /// digit (`#abc` == `#aabbcc`).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.strip_prefix('#').ok_or(ParseColorError::MissingHashPrefix)?;

        fn nibble(b: u8) -> Result<u8, ParseColorError> {
            match b {
                b'0'..=b'9' => Ok(b - b'0'),
                b'a'..=b'f' => Ok(b - b'a' + 10),
                b'A'..=b'F' => Ok(b - b'A' + 10),
                _ => Err(ParseColorError::InvalidHexDigit { ch: b as char }),
            }
        }

        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 | 8 => {
                let mut channels = [0u8; 4];
                channels[3] = 0xFF;
                for (i, pair) in bytes.chunks_exact(2).enumerate() {
                    channels[i] = nibble(pair[0])? << 4 | nibble(pair[1])?;
                }
                Ok(Self::rgba(channels[0], channels[1], channels[2], channels[3]))
            }
            len => Err(ParseColorError::UnsupportedLength { len }),
        }
    }
}

impl fmt::Display for Rgba {
    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a() == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r(),
                self.g(),
                self.b(),
                self.a()
            )
        }
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Why a hex color string failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not start with `#`.
    MissingHashPrefix,
    /// The digit count is not 3, 6, or 8.
    UnsupportedLength { len: usize },
    /// A character outside `[0-9a-fA-F]`.
    InvalidHexDigit { ch: char },
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHashPrefix => write!(f, "hex color must start with '#'"),
            Self::UnsupportedLength { len } => {
                write!(f, "hex color must have 3, 6, or 8 digits, got {len}")
            }
            Self::InvalidHexDigit { ch } => write!(f, "invalid hex digit {ch:?}"),
        }
    }
}

impl std::error::Error for ParseColorError {}

#[cfg(test)]
mod tests {
    use super::{ParseColorError, Rgba};

    #[test]
    fn packs_channels_in_rgba_order() {
        let c = Rgba::rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x1122_3344);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn parses_six_digit_hex() {
        let c: Rgba = "#4E79A7".parse().unwrap();
        assert_eq!(c, Rgba::rgb(0x4E, 0x79, 0xA7));
        assert_eq!(c.a(), 0xFF);
    }

    #[test]
    fn parses_lowercase_and_short_forms() {
        assert_eq!("#f28e2b".parse::<Rgba>().unwrap(), Rgba::rgb(0xF2, 0x8E, 0x2B));
        assert_eq!("#abc".parse::<Rgba>().unwrap(), Rgba::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let c: Rgba = "#E1575980".parse().unwrap();
        assert_eq!(c, Rgba::rgba(0xE1, 0x57, 0x59, 0x80));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            "4E79A7".parse::<Rgba>(),
            Err(ParseColorError::MissingHashPrefix)
        );
        assert_eq!(
            "#12345".parse::<Rgba>(),
            Err(ParseColorError::UnsupportedLength { len: 5 })
        );
        assert_eq!(
            "#12345G".parse::<Rgba>(),
            Err(ParseColorError::InvalidHexDigit { ch: 'G' })
        );
    }

    #[test]
    fn display_round_trips() {
        for s in ["#4E79A7", "#F28E2B", "#E1575980"] {
            let c: Rgba = s.parse().unwrap();
            assert_eq!(c.to_string(), s);
        }
    }

    #[test]
    fn serde_uses_hex_string_form() {
        let c = Rgba::rgb(0x4E, 0x79, 0xA7);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#4E79A7\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn serde_rejects_bad_hex() {
        assert!(serde_json::from_str::<Rgba>("\"blue\"").is_err());
    }
}
