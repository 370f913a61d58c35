pub mod record_cleaner;
pub mod station_merger;

pub use record_cleaner::{CleaningReport, RecordCleaner};
pub use station_merger::StationMerger;
