use std::ops::Range;

use anyhow::{bail, Result};
use chrono::Duration;

/// Loop shape and sampling bounds for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Months relative to today, previous through next.
    pub month_offsets: Range<i32>,

    /// Day slots per month. Only the count matters; the slot value does not
    /// feed into the generated date.
    pub day_slots: Range<i32>,

    pub meetings_per_day: u32,

    /// Days added after the month shift, sampled per meeting (upper bound exclusive).
    pub day_offset_range: Range<i64>,

    /// Start hour, sampled per meeting (upper bound exclusive).
    pub hour_range: Range<i64>,

    pub duration: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            month_offsets: -1..2,
            day_slots: -5..5,
            meetings_per_day: 2,
            day_offset_range: 1..28,
            hour_range: 9..18,
            duration: Duration::hours(1),
        }
    }
}

impl GeneratorConfig {
    /// Number of meetings a single run produces.
    pub fn batch_size(&self) -> usize {
        self.month_offsets.len() * self.day_slots.len() * self.meetings_per_day as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.day_offset_range.is_empty() {
            bail!("day offset range {:?} is empty", self.day_offset_range);
        }
        if self.hour_range.is_empty() {
            bail!("hour range {:?} is empty", self.hour_range);
        }
        if self.duration <= Duration::zero() {
            bail!("meeting duration must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_batch_is_sixty() {
        let config = GeneratorConfig::default();
        assert_eq!(config.batch_size(), 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_sampling_ranges_are_rejected() {
        let config = GeneratorConfig {
            hour_range: 9..9,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            day_offset_range: 5..1,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            duration: Duration::zero(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
