pub mod catalog;
pub mod generator;
pub mod models;
pub mod settings;
pub mod store;
mod utils;
pub mod view_model;

pub use catalog::Catalog;
pub use generator::{AppointmentGenerator, GeneratorConfig};
pub use models::{ColorTag, Meeting};
pub use settings::{GeneratorSettings, SettingsStore};
pub use store::{MeetingStore, MeetingsEvent, SubscriptionId};
pub use view_model::ScheduleViewModel;

use log::info;

/// Process entry: builds the agenda from user settings and writes it to
/// stdout as JSON for whatever front end consumes it.
pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("schedule starting up...");

    let settings = SettingsStore::from_env()?;
    info!("Using settings from {}", settings.path().display());

    let view_model = ScheduleViewModel::from_settings(&settings.generator())?;

    if let Some((start, end)) = view_model.date_range() {
        info!(
            "Agenda holds {} meetings between {} and {}",
            view_model.meetings().len(),
            start,
            end
        );
    }

    let rendered = serde_json::to_string_pretty(view_model.meetings().as_ref())?;
    println!("{rendered}");

    Ok(())
}
