use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Categorical color attached to a meeting for rendering.
///
/// Stored as ARGB so that both `#RRGGBB` and `#AARRGGBB` palettes round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorTag {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let Some(digits) = hex.strip_prefix('#') else {
            bail!("Invalid color '{hex}'. Must start with '#'");
        };

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Invalid color '{hex}'. Must be hex (#RRGGBB or #AARRGGBB)");
        }

        let value = u32::from_str_radix(digits, 16)
            .with_context(|| format!("Invalid color '{hex}'"))?;

        match digits.len() {
            6 => Ok(Self::rgba(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                0xFF,
            )),
            8 => Ok(Self::rgba(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                (value >> 24) as u8,
            )),
            _ => bail!("Invalid color '{hex}'. Must be hex (#RRGGBB or #AARRGGBB)"),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ColorTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub event_name: String,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub color: ColorTag,
}

impl Meeting {
    pub fn duration(&self) -> Duration {
        self.to - self.from
    }
}
