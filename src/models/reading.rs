use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One (sensor, timestamp) observation as fetched from the upstream API.
///
/// The timestamp stays in its source text form here; the cleaner casts it
/// once the merged snapshot has been persisted, so the raw snapshot is an
/// untouched copy of what the endpoint returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub idsensore: u32,
    pub data: String,
    pub valore: f64,
    pub idoperatore: u32,
    pub unitamisura: String,
}

impl Reading {
    pub fn new(
        idsensore: u32,
        data: String,
        valore: f64,
        idoperatore: u32,
        unitamisura: String,
    ) -> Self {
        Self {
            idsensore,
            data,
            valore,
            idoperatore,
            unitamisura,
        }
    }

    /// Parse the raw timestamp with the given format
    pub fn parse_timestamp(&self, format: &str) -> Result<NaiveDateTime> {
        Ok(NaiveDateTime::parse_from_str(&self.data, format)?)
    }

    pub fn is_sentinel(&self, sentinel: f64) -> bool {
        self.valore == sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{READING_DATE_FORMAT, SENTINEL_VALUE};

    #[test]
    fn test_parse_timestamp() {
        let reading = Reading::new(
            10431,
            "09/03/2015 14:00:00".to_string(),
            54.2,
            1,
            "µg/m³".to_string(),
        );

        let ts = reading.parse_timestamp(READING_DATE_FORMAT).unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2015-03-09 14:00");
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let reading = Reading::new(10431, "2015-03-09".to_string(), 54.2, 1, "µg/m³".to_string());

        assert!(reading.parse_timestamp(READING_DATE_FORMAT).is_err());
    }

    #[test]
    fn test_sentinel_detection() {
        let invalid = Reading::new(10431, "09/03/2015 14:00:00".to_string(), -9999.0, 1, "µg/m³".to_string());
        let valid = Reading::new(10431, "09/03/2015 15:00:00".to_string(), 3.1, 1, "µg/m³".to_string());

        assert!(invalid.is_sentinel(SENTINEL_VALUE));
        assert!(!valid.is_sentinel(SENTINEL_VALUE));
    }
}
