use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::models::{CleanedRecord, Season};
use crate::writers::CsvWriter;

#[derive(Debug, Serialize)]
pub struct AirQualityStatistics {
    pub total_records: usize,
    pub unique_sensors: usize,
    pub unique_stations: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub value_stats: ValueStats,
    pub pollutant_counts: BTreeMap<String, usize>,
    pub seasonal_profile: Vec<SeasonalMean>,
    pub peak_period: Option<PeakPeriod>,
}

#[derive(Debug, Serialize)]
pub struct ValueStats {
    pub min_value: f64,
    pub max_value: f64,
    pub avg_value: f64,
    pub min_location: String,
    pub max_location: String,
}

/// Mean concentration for one meteorological season
#[derive(Debug, Serialize)]
pub struct SeasonalMean {
    pub season: String,
    pub mean_value: f64,
    pub samples: usize,
}

/// Hour of day with the highest mean concentration
#[derive(Debug, Serialize)]
pub struct PeakPeriod {
    pub hour: u32,
    pub mean_value: f64,
}

/// Descriptive statistics over a cleaned snapshot.
///
/// This is the textual counterpart of the workflow's seasonal and
/// peak-period charts: per-pollutant record counts, seasonal mean
/// concentrations and the peak hour of day.
pub struct AirQualityAnalyzer;

impl AirQualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a cleaned snapshot file, optionally restricted to one
    /// pollutant display name.
    pub fn analyze_csv(
        &self,
        path: &Path,
        pollutant: Option<&str>,
    ) -> Result<AirQualityStatistics> {
        let records: Vec<CleanedRecord> = CsvWriter::new().read_records(path)?;
        self.analyze_records(&records, pollutant)
    }

    pub fn analyze_records(
        &self,
        records: &[CleanedRecord],
        pollutant: Option<&str>,
    ) -> Result<AirQualityStatistics> {
        let selected: Vec<&CleanedRecord> = match pollutant {
            Some(name) => records.iter().filter(|r| r.sensor_name == name).collect(),
            None => records.iter().collect(),
        };

        if selected.is_empty() {
            return Err(PipelineError::MissingData(
                "no records to analyze".to_string(),
            ));
        }

        let mut unique_sensors = HashSet::new();
        let mut unique_stations = HashSet::new();
        let mut pollutant_counts: BTreeMap<String, usize> = BTreeMap::new();

        let first = selected[0];
        let mut min_date = first.date.date();
        let mut max_date = first.date.date();
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut min_location = String::new();
        let mut max_location = String::new();
        let mut value_sum = 0.0f64;

        let mut seasonal_sums: BTreeMap<Season, (f64, usize)> = BTreeMap::new();
        let mut hourly_sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

        for record in &selected {
            unique_sensors.insert(record.sensor_id);
            unique_stations.insert(record.station_id);
            *pollutant_counts
                .entry(record.sensor_name.clone())
                .or_insert(0) += 1;

            let date = record.date.date();
            if date < min_date {
                min_date = date;
            }
            if date > max_date {
                max_date = date;
            }

            if record.value < min_value {
                min_value = record.value;
                min_location = record.station_name.clone();
            }
            if record.value > max_value {
                max_value = record.value;
                max_location = record.station_name.clone();
            }
            value_sum += record.value;

            let seasonal = seasonal_sums.entry(record.season()).or_insert((0.0, 0));
            seasonal.0 += record.value;
            seasonal.1 += 1;

            let hourly = hourly_sums.entry(record.hour()).or_insert((0.0, 0));
            hourly.0 += record.value;
            hourly.1 += 1;
        }

        let seasonal_profile = Season::ALL
            .iter()
            .filter_map(|season| {
                seasonal_sums.get(season).map(|(sum, count)| SeasonalMean {
                    season: season.name().to_string(),
                    mean_value: sum / *count as f64,
                    samples: *count,
                })
            })
            .collect();

        let peak_period = hourly_sums
            .iter()
            .map(|(hour, (sum, count))| (*hour, sum / *count as f64))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(hour, mean_value)| PeakPeriod { hour, mean_value });

        Ok(AirQualityStatistics {
            total_records: selected.len(),
            unique_sensors: unique_sensors.len(),
            unique_stations: unique_stations.len(),
            date_range: (min_date, max_date),
            value_stats: ValueStats {
                min_value,
                max_value,
                avg_value: value_sum / selected.len() as f64,
                min_location,
                max_location,
            },
            pollutant_counts,
            seasonal_profile,
            peak_period,
        })
    }
}

impl Default for AirQualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualityStatistics {
    pub fn summary(&self) -> String {
        let pollutants: Vec<String> = self
            .pollutant_counts
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();

        format!(
            "Records: {} total\n\
            Sensors: {} ({} stations)\n\
            Date Range: {} to {}\n\
            Pollutants: {}\n\
            Concentration Range: {:.1} to {:.1} (avg {:.1})",
            self.total_records,
            self.unique_sensors,
            self.unique_stations,
            self.date_range.0,
            self.date_range.1,
            pollutants.join(", "),
            self.value_stats.min_value,
            self.value_stats.max_value,
            self.value_stats.avg_value
        )
    }

    pub fn detailed_summary(&self) -> String {
        let seasonal: Vec<String> = self
            .seasonal_profile
            .iter()
            .map(|s| format!("- {}: {:.1} avg over {} readings", s.season, s.mean_value, s.samples))
            .collect();

        let peak = match &self.peak_period {
            Some(peak) => format!("{:02}:00 ({:.1} avg)", peak.hour, peak.mean_value),
            None => "n/a".to_string(),
        };

        format!(
            "{}\n\n\
            Extremes:\n\
            - Lowest: {:.1} at {}\n\
            - Highest: {:.1} at {}\n\n\
            Seasonal Profile:\n\
            {}\n\n\
            Peak Hour: {}",
            self.summary(),
            self.value_stats.min_value,
            self.value_stats.min_location,
            self.value_stats.max_value,
            self.value_stats.max_location,
            seasonal.join("\n"),
            peak
        )
    }
}
