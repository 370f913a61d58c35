use serde::{Deserialize, Serialize};

use crate::models::{Reading, Station};

/// A reading left-joined with its station metadata.
///
/// The row is kept flat so the merged snapshot serializes to one CSV row
/// per fetched reading. Every station-side column is optional: a reading
/// whose `idsensore` has no match in the reference file keeps its own
/// fields and null station fields, never gets dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedRecord {
    pub idsensore: u32,
    pub data: String,
    pub valore: f64,
    pub idoperatore: u32,
    pub unitamisura: String,
    pub nometiposensore: Option<String>,
    pub idstazione: Option<u32>,
    pub nomestazione: Option<String>,
    pub quota: Option<i32>,
    pub provincia: Option<String>,
    pub comune: Option<String>,
    pub storico: Option<String>,
    pub datastart: Option<String>,
    pub datastop: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl MergedRecord {
    pub fn from_parts(reading: &Reading, station: Option<&Station>) -> Self {
        Self {
            idsensore: reading.idsensore,
            data: reading.data.clone(),
            valore: reading.valore,
            idoperatore: reading.idoperatore,
            unitamisura: reading.unitamisura.clone(),
            nometiposensore: station.map(|s| s.nometiposensore.clone()),
            idstazione: station.map(|s| s.idstazione),
            nomestazione: station.map(|s| s.nomestazione.clone()),
            quota: station.map(|s| s.quota),
            provincia: station.map(|s| s.provincia.clone()),
            comune: station.map(|s| s.comune.clone()),
            storico: station.map(|s| s.storico.clone()),
            datastart: station.map(|s| s.datastart.clone()),
            datastop: station.and_then(|s| s.datastop.clone()),
            lat: station.map(|s| s.lat),
            lng: station.map(|s| s.lng),
        }
    }

    pub fn has_station(&self) -> bool {
        self.idstazione.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_reading_keeps_null_station_fields() {
        let reading = Reading::new(
            99999,
            "09/03/2015 14:00:00".to_string(),
            54.2,
            1,
            "µg/m³".to_string(),
        );

        let merged = MergedRecord::from_parts(&reading, None);

        assert_eq!(merged.idsensore, 99999);
        assert_eq!(merged.valore, 54.2);
        assert!(!merged.has_station());
        assert!(merged.nometiposensore.is_none());
        assert!(merged.lat.is_none());
    }
}
