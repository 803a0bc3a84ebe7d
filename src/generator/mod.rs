pub mod appointments;
pub mod config;

pub use appointments::{today, AppointmentGenerator};
pub use config::GeneratorConfig;
