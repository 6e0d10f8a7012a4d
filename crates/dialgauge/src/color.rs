use derive_more::{Deref, From, Into};
use palette::{Mix, Srgb, Srgba};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fill color of a dial. Parsed from `#rgb`, `#rrggbb`, `#rrggbbaa` or a CSS color name.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<f64>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Invalid hex color: #{0}")]
    InvalidHex(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    pub fn gray() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }

    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    pub fn orange() -> Self {
        Self::rgb(1.0, 0.5, 0.0)
    }

    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    pub fn components(&self) -> (f64, f64, f64, f64) {
        self.0.into_components()
    }

    /// Interpolates towards `other`; `factor` is clamped to `[0, 1]`.
    pub fn mix(self, other: Color, factor: f64) -> Self {
        Self(self.0.mix(other.0, factor.clamp(0.0, 1.0)))
    }

    fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(hex.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let (rgb, alpha) = match hex.len() {
            3 | 6 => (hex, None),
            8 => (&hex[..6], Some(&hex[6..])),
            _ => return Err(invalid()),
        };

        let rgb: Srgb<u8> = rgb.parse().map_err(|_| invalid())?;
        let alpha = alpha
            .map(|a| u8::from_str_radix(a, 16))
            .transpose()
            .map_err(|_| invalid())?
            .unwrap_or(u8::MAX);

        Ok(Self(
            Srgba::new(rgb.red, rgb.green, rgb.blue, alpha).into_format(),
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::gray()
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Self {
        Self(rgb.into_format::<f64>().into())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        palette::named::from_str(&s.to_ascii_lowercase())
            .map(Self::from)
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Srgba<u8> = self.0.into_format();
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)?;
        if c.alpha != u8::MAX {
            write!(f, "{:02x}", c.alpha)?;
        }
        Ok(())
    }
}
