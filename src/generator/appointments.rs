//! Synthetic appointment generator.
//!
//! Produces a batch of one-hour meetings across the previous, current and next
//! month. Each meeting's day and hour are sampled independently; the day-slot
//! and per-day loops only decide how many meetings are drawn per month.

use anyhow::{Context, Result};
use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::models::Meeting;
use crate::store::MeetingStore;
use crate::{log_debug, log_info};

use super::GeneratorConfig;

const ENABLE_LOGS: bool = true;

/// Local calendar date at the moment of the call.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct AppointmentGenerator<R: Rng> {
    catalog: Catalog,
    config: GeneratorConfig,
    rng: R,
}

impl AppointmentGenerator<StdRng> {
    pub fn with_seed(catalog: Catalog, config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::new(catalog, config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(catalog: Catalog, config: GeneratorConfig) -> Result<Self> {
        Self::new(catalog, config, StdRng::from_entropy())
    }
}

impl<R: Rng> AppointmentGenerator<R> {
    pub fn new(catalog: Catalog, config: GeneratorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            rng,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Generates one batch relative to `today`, in month-major, day-minor,
    /// slot-innermost order.
    pub fn generate(&mut self, today: NaiveDate) -> Result<Vec<Meeting>> {
        let mut meetings = Vec::with_capacity(self.config.batch_size());
        self.generate_each(today, |meeting| meetings.push(meeting))?;

        log_info!(
            "Generated {} meetings around {} (months {:?})",
            meetings.len(),
            today,
            self.config.month_offsets
        );
        Ok(meetings)
    }

    /// Appends one batch to `store`, notifying its observers per meeting.
    pub fn generate_into(&mut self, today: NaiveDate, store: &mut MeetingStore) -> Result<usize> {
        let mut added = 0;
        self.generate_each(today, |meeting| {
            store.push(meeting);
            added += 1;
        })?;

        log_info!("Appended {} generated meetings to store", added);
        Ok(added)
    }

    fn generate_each<F>(&mut self, today: NaiveDate, mut sink: F) -> Result<()>
    where
        F: FnMut(Meeting),
    {
        let midnight = today.and_time(NaiveTime::MIN);

        for month in self.config.month_offsets.clone() {
            let month_start = shift_months(midnight, month)
                .with_context(|| format!("{today} shifted by {month} months is out of range"))?;
            log_debug!("Sampling month offset {} from {}", month, month_start);

            for _day in self.config.day_slots.clone() {
                for _slot in 0..self.config.meetings_per_day {
                    sink(self.sample_meeting(month_start)?);
                }
            }
        }

        Ok(())
    }

    fn sample_meeting(&mut self, month_start: NaiveDateTime) -> Result<Meeting> {
        let days = self.rng.gen_range(self.config.day_offset_range.clone());
        let hours = self.rng.gen_range(self.config.hour_range.clone());

        let from = Duration::try_days(days)
            .zip(Duration::try_hours(hours))
            .and_then(|(day_delta, hour_delta)| {
                month_start
                    .checked_add_signed(day_delta)?
                    .checked_add_signed(hour_delta)
            })
            .with_context(|| format!("{month_start} + {days}d {hours}h is out of range"))?;
        let to = from
            .checked_add_signed(self.config.duration)
            .with_context(|| format!("meeting starting {from} ends out of range"))?;

        let name_index = self.rng.gen_range(0..self.catalog.reachable_event_names().len());
        let color_index = self.rng.gen_range(0..self.catalog.reachable_colors().len());

        Ok(Meeting {
            event_name: self.catalog.event_name(name_index).to_string(),
            from,
            to,
            color: self.catalog.color(color_index),
        })
    }
}

/// Calendar month shift; the day clamps to the end of shorter months.
fn shift_months(at: NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        at.checked_add_months(magnitude)
    } else {
        at.checked_sub_months(magnitude)
    }
}
