use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::models::{CleanedRecord, MergedRecord, Pollutant};
use crate::utils::constants::{
    ALLOWED_POLLUTANTS, READING_DATE_FORMAT, SENTINEL_VALUE, STATION_DATE_FORMAT,
};

/// Row accounting for one cleaning pass
#[derive(Debug, Clone)]
pub struct CleaningReport {
    pub total_rows: usize,
    pub invalid_values: usize,
    pub valid_values: usize,
    pub outside_allow_list: usize,
    pub retained: usize,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        format!(
            "Cleaning Report\n\
            ===============\n\
            Input rows: {}\n\
            Invalid sentinel values dropped: {}\n\
            Valid measurements: {}\n\
            Outside pollutant allow-list: {}\n\
            Retained: {}",
            self.total_rows,
            self.invalid_values,
            self.valid_values,
            self.outside_allow_list,
            self.retained
        )
    }
}

/// Applies the cleaning contract to merged records, strictly in order:
/// date casting, sentinel removal, allow-list filtering, pollutant
/// mapping, output renaming.
pub struct RecordCleaner {
    allowed_pollutants: Vec<String>,
    sentinel: f64,
    reading_date_format: String,
    station_date_format: String,
}

struct ParsedDates {
    date: NaiveDateTime,
    date_start: Option<NaiveDate>,
    date_stop: Option<NaiveDate>,
}

impl RecordCleaner {
    pub fn new() -> Self {
        Self {
            allowed_pollutants: ALLOWED_POLLUTANTS.iter().map(|s| s.to_string()).collect(),
            sentinel: SENTINEL_VALUE,
            reading_date_format: READING_DATE_FORMAT.to_string(),
            station_date_format: STATION_DATE_FORMAT.to_string(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            allowed_pollutants: config.allowed_pollutants.clone(),
            sentinel: SENTINEL_VALUE,
            reading_date_format: config.reading_date_format.clone(),
            station_date_format: config.station_date_format.clone(),
        }
    }

    pub fn clean(
        &self,
        records: &[MergedRecord],
    ) -> Result<(Vec<CleanedRecord>, CleaningReport)> {
        let total_rows = records.len();

        // Step 1: cast the three date-bearing columns for every row.
        // Later steps rely on these coercions, so a malformed date is
        // fatal here, before any filtering.
        let mut parsed: Vec<(&MergedRecord, ParsedDates)> = Vec::with_capacity(total_rows);
        for record in records {
            parsed.push((record, self.parse_dates(record)?));
        }

        // Step 2: count invalid vs valid, then drop the sentinel rows
        let invalid_values = parsed
            .iter()
            .filter(|(record, _)| record.valore == self.sentinel)
            .count();
        let valid_values = total_rows - invalid_values;
        info!(
            total_rows,
            invalid_values, valid_values, "sentinel scan before dropping"
        );
        parsed.retain(|(record, _)| record.valore != self.sentinel);

        // Step 3: restrict to the pollutant allow-list. Rows without a
        // station match carry no sensor type and fall out here too.
        let before_allow_list = parsed.len();
        parsed.retain(|(record, _)| match record.nometiposensore.as_deref() {
            Some(label) => self.allowed_pollutants.iter().any(|allowed| allowed == label),
            None => false,
        });
        let outside_allow_list = before_allow_list - parsed.len();

        // Steps 4 and 5: map the retained labels and rename into the
        // output schema
        let mut cleaned = Vec::with_capacity(parsed.len());
        for (record, dates) in parsed {
            cleaned.push(self.to_cleaned(record, dates)?);
        }

        let report = CleaningReport {
            total_rows,
            invalid_values,
            valid_values,
            outside_allow_list,
            retained: cleaned.len(),
        };
        info!(retained = report.retained, "cleaning pass finished");

        Ok((cleaned, report))
    }

    fn parse_dates(&self, record: &MergedRecord) -> Result<ParsedDates> {
        let date = NaiveDateTime::parse_from_str(&record.data, &self.reading_date_format)?;
        let date_start = self.parse_station_date(record.datastart.as_deref())?;
        let date_stop = self.parse_station_date(record.datastop.as_deref())?;

        Ok(ParsedDates {
            date,
            date_start,
            date_stop,
        })
    }

    fn parse_station_date(&self, raw: Option<&str>) -> Result<Option<NaiveDate>> {
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => Ok(Some(NaiveDate::parse_from_str(
                text.trim(),
                &self.station_date_format,
            )?)),
        }
    }

    fn to_cleaned(&self, record: &MergedRecord, dates: ParsedDates) -> Result<CleanedRecord> {
        let sensor_id = record.idsensore;

        // Anything reaching this point passed the allow-list, so an
        // unmapped label means the upstream data contract changed.
        let label = require(record.nometiposensore.as_deref(), "nometiposensore", sensor_id)?;
        let pollutant =
            Pollutant::from_source_label(label).ok_or_else(|| PipelineError::UnknownPollutant {
                label: label.to_string(),
            })?;

        Ok(CleanedRecord {
            sensor_id,
            date: dates.date,
            value: record.valore,
            operator_id: record.idoperatore,
            sensor_name: pollutant.display_name().to_string(),
            sensor_symbol: pollutant.symbol().to_string(),
            unit_measure: record.unitamisura.clone(),
            station_id: require(record.idstazione, "idstazione", sensor_id)?,
            station_name: require(record.nomestazione.clone(), "nomestazione", sensor_id)?,
            altitude: require(record.quota, "quota", sensor_id)?,
            province: require(record.provincia.clone(), "provincia", sensor_id)?,
            municipality: require(record.comune.clone(), "comune", sensor_id)?,
            historical: require(record.storico.clone(), "storico", sensor_id)?,
            date_start: dates.date_start,
            date_stop: dates.date_stop,
            lat: require(record.lat, "lat", sensor_id)?,
            long: require(record.lng, "lng", sensor_id)?,
        })
    }
}

impl Default for RecordCleaner {
    fn default() -> Self {
        Self::new()
    }
}

fn require<T>(value: Option<T>, field: &'static str, sensor_id: u32) -> Result<T> {
    value.ok_or(PipelineError::MissingStationField { field, sensor_id })
}
