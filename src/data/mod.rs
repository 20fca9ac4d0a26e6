//! Data module - CSV loading, cleaning and typed records

mod cleaner;
mod loader;
mod record;

pub use cleaner::{DataCleaner, UNIX_EPOCH_DAYS_FROM_CE};
pub use loader::DataLoader;
pub use record::{Area, Observation, ObservationTable, YearMonth};
