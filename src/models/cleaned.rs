use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the cleaned output schema.
///
/// Field order is the CSV column order of the cleaned and filtered
/// snapshots. A cleaned record always carries station metadata: rows
/// whose sensor type survived the allow-list necessarily matched a
/// station during the merge. Only the validity window may be open-ended.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CleanedRecord {
    pub sensor_id: u32,
    pub date: NaiveDateTime,
    pub value: f64,
    pub operator_id: u32,

    #[validate(length(min = 1))]
    pub sensor_name: String,

    pub sensor_symbol: String,
    pub unit_measure: String,
    pub station_id: u32,

    #[validate(length(min = 1))]
    pub station_name: String,

    pub altitude: i32,
    pub province: String,
    pub municipality: String,
    pub historical: String,
    pub date_start: Option<NaiveDate>,
    pub date_stop: Option<NaiveDate>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub long: f64,
}

impl CleanedRecord {
    pub fn season(&self) -> Season {
        Season::from_month(chrono::Datelike::month(&self.date.date()))
    }

    pub fn hour(&self) -> u32 {
        chrono::Timelike::hour(&self.date)
    }
}

/// Meteorological season of a reading, used by the seasonal summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record(datetime: &str) -> CleanedRecord {
        CleanedRecord {
            sensor_id: 10431,
            date: NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S").unwrap(),
            value: 54.2,
            operator_id: 1,
            sensor_name: "Nitrogen Dioxide".to_string(),
            sensor_symbol: "NO2".to_string(),
            unit_measure: "µg/m³".to_string(),
            station_id: 501,
            station_name: "Milano - Viale Marche".to_string(),
            altitude: 122,
            province: "MI".to_string(),
            municipality: "Milano".to_string(),
            historical: "N".to_string(),
            date_start: NaiveDate::from_ymd_opt(1998, 11, 11),
            date_stop: None,
            lat: 45.496,
            long: 9.193,
        }
    }

    #[test]
    fn test_record_validation() {
        let record = sample_record("2015-03-09 14:00:00");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_season_assignment() {
        assert_eq!(sample_record("2015-01-15 08:00:00").season(), Season::Winter);
        assert_eq!(sample_record("2015-12-01 08:00:00").season(), Season::Winter);
        assert_eq!(sample_record("2015-04-20 08:00:00").season(), Season::Spring);
        assert_eq!(sample_record("2015-07-04 08:00:00").season(), Season::Summer);
        assert_eq!(sample_record("2015-10-31 08:00:00").season(), Season::Autumn);
    }

    #[test]
    fn test_hour_extraction() {
        assert_eq!(sample_record("2015-03-09 18:00:00").hour(), 18);
    }
}
