pub mod cleaned;
pub mod merged;
pub mod pollutant;
pub mod reading;
pub mod station;

pub use cleaned::{CleanedRecord, Season};
pub use merged::MergedRecord;
pub use pollutant::Pollutant;
pub use reading::Reading;
pub use station::Station;
