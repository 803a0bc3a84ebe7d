use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::catalog::Catalog;
use crate::generator::{self, AppointmentGenerator, GeneratorConfig};
use crate::log_info;
use crate::models::Meeting;
use crate::settings::GeneratorSettings;
use crate::store::{MeetingStore, MeetingsEvent, SubscriptionId};

const ENABLE_LOGS: bool = true;

/// Agenda state handed to the presentation layer.
///
/// The meeting batch is generated once, synchronously, while the view model is
/// constructed; observers can only attach afterwards.
#[derive(Debug)]
pub struct ScheduleViewModel {
    catalog: Catalog,
    store: MeetingStore,
}

impl ScheduleViewModel {
    pub fn new<R: Rng>(
        catalog: Catalog,
        config: GeneratorConfig,
        rng: R,
        today: NaiveDate,
    ) -> Result<Self> {
        let generator = AppointmentGenerator::new(catalog, config, rng)?;
        Self::from_generator(generator, today)
    }

    /// Builds from user settings, anchored on the local date.
    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self> {
        let catalog = settings.catalog()?;
        let config = GeneratorConfig::default();
        let today = generator::today();

        match settings.seed {
            Some(seed) => {
                log_info!("Generating agenda for {} with seed {}", today, seed);
                let generator = AppointmentGenerator::with_seed(catalog, config, seed)?;
                Self::from_generator(generator, today)
            }
            None => {
                log_info!("Generating agenda for {} from entropy", today);
                let generator = AppointmentGenerator::from_entropy(catalog, config)?;
                Self::from_generator(generator, today)
            }
        }
    }

    fn from_generator<R: Rng>(
        mut generator: AppointmentGenerator<R>,
        today: NaiveDate,
    ) -> Result<Self> {
        let meetings = generator.generate(today)?;
        Ok(Self {
            catalog: generator.into_catalog(),
            store: MeetingStore::with_meetings(meetings),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn meetings(&self) -> Arc<Vec<Meeting>> {
        self.store.meetings()
    }

    pub fn set_meetings(&mut self, meetings: Arc<Vec<Meeting>>) -> bool {
        self.store.set_meetings(meetings)
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&MeetingsEvent) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Meetings starting on `date`, earliest first.
    pub fn meetings_on(&self, date: NaiveDate) -> Vec<Meeting> {
        let mut day: Vec<Meeting> = self
            .store
            .meetings()
            .iter()
            .filter(|meeting| meeting.from.date() == date)
            .cloned()
            .collect();
        // Stable: meetings at the same hour keep generation order.
        day.sort_by_key(|meeting| meeting.from);
        day
    }

    /// Earliest start and latest end across the held meetings.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let meetings = self.store.meetings();
        let start = meetings.iter().map(|meeting| meeting.from).min()?;
        let end = meetings.iter().map(|meeting| meeting.to).max()?;
        Some((start, end))
    }
}
