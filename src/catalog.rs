//! Event-name catalog and color palette used by the generator.
//!
//! Both sequences carry an explicit reachable prefix: sampling only ever draws
//! from `[0, reachable)`, so entries past the prefix never appear in generated
//! meetings even though they are part of the catalog.

use anyhow::{bail, Result};

use crate::models::ColorTag;

pub const DEFAULT_EVENT_NAMES: [&str; 10] = [
    "General Meeting",
    "Plan Execution",
    "Project Plan",
    "Consulting",
    "Support",
    "Development Meeting",
    "Scrum",
    "Project Completion",
    "Release updates",
    "Performance Check",
];

pub const DEFAULT_PALETTE: [&str; 16] = [
    "#FFA2C139",
    "#FFD80073",
    "#FF1BA1E2",
    "#FFE671B8",
    "#FFF09609",
    "#FF339933",
    "#FF00ABA9",
    "#FFE671B8",
    "#FF1BA1E2",
    "#FFD80073",
    "#FFA2C139",
    "#FFA2C139",
    "#FFD80073",
    "#FF339933",
    "#FFE671B8",
    "#FF00ABA9",
];

/// Only the first seven names are ever sampled.
pub const DEFAULT_REACHABLE_EVENT_NAMES: usize = 7;

/// Only the first fourteen colors are ever sampled.
pub const DEFAULT_REACHABLE_COLORS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    event_names: Vec<String>,
    reachable_event_names: usize,
    palette: Vec<ColorTag>,
    reachable_colors: usize,
}

impl Catalog {
    pub fn new(
        event_names: Vec<String>,
        reachable_event_names: usize,
        palette: Vec<ColorTag>,
        reachable_colors: usize,
    ) -> Result<Self> {
        validate_prefix("event name catalog", event_names.len(), reachable_event_names)?;
        validate_prefix("color palette", palette.len(), reachable_colors)?;

        Ok(Self {
            event_names,
            reachable_event_names,
            palette,
            reachable_colors,
        })
    }

    pub fn from_hex_palette<S: AsRef<str>>(
        event_names: Vec<String>,
        reachable_event_names: usize,
        hex_palette: &[S],
        reachable_colors: usize,
    ) -> Result<Self> {
        let palette = hex_palette
            .iter()
            .map(|hex| ColorTag::from_hex(hex.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::new(event_names, reachable_event_names, palette, reachable_colors)
    }

    pub fn event_names(&self) -> &[String] {
        &self.event_names
    }

    pub fn palette(&self) -> &[ColorTag] {
        &self.palette
    }

    pub fn reachable_event_names(&self) -> &[String] {
        &self.event_names[..self.reachable_event_names]
    }

    pub fn reachable_colors(&self) -> &[ColorTag] {
        &self.palette[..self.reachable_colors]
    }

    /// Name at `index` within the reachable prefix.
    ///
    /// Panics when `index` lies outside the prefix; callers sample within
    /// `0..reachable_event_names().len()`.
    pub fn event_name(&self, index: usize) -> &str {
        assert!(
            index < self.reachable_event_names,
            "event name index {index} outside reachable prefix {}",
            self.reachable_event_names
        );
        &self.event_names[index]
    }

    pub fn color(&self, index: usize) -> ColorTag {
        assert!(
            index < self.reachable_colors,
            "color index {index} outside reachable prefix {}",
            self.reachable_colors
        );
        self.palette[index]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_hex_palette(
            DEFAULT_EVENT_NAMES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_REACHABLE_EVENT_NAMES,
            &DEFAULT_PALETTE,
            DEFAULT_REACHABLE_COLORS,
        )
        .expect("built-in catalog tables are valid")
    }
}

fn validate_prefix(what: &str, len: usize, reachable: usize) -> Result<()> {
    if len == 0 {
        bail!("{what} must not be empty");
    }
    if reachable == 0 {
        bail!("{what} reachable prefix must be at least 1");
    }
    if reachable > len {
        bail!("{what} reachable prefix {reachable} exceeds its {len} entries");
    }
    Ok(())
}
