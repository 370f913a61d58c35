use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::constants::{
    ALLOWED_POLLUTANTS, CLEANED_SNAPSHOT_FILE, DEFAULT_ENDPOINT_URL, DEFAULT_MAX_OFFSET,
    DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TARGET_POLLUTANT, FILTERED_SNAPSHOT_FILE,
    MERGED_SNAPSHOT_FILE, RAW_SNAPSHOT_FILE, READING_DATE_FORMAT, STATIONS_FILE,
    STATION_DATE_FORMAT,
};

/// Every operational parameter of the pipeline in one place.
///
/// Defaults come from `utils::constants`; an optional TOML file can
/// override any subset of fields, and CLI flags are applied on top by the
/// command layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upstream CSV endpoint accepting `$limit`/`$offset`
    pub endpoint_url: String,

    /// Rows requested per page
    pub page_size: u64,

    /// Safety ceiling for the pagination offset
    pub max_offset: u64,

    /// Local station metadata reference file
    pub stations_file: PathBuf,

    /// Directory the snapshots are written into
    pub output_dir: PathBuf,

    /// Snapshot file names within `output_dir`
    pub raw_snapshot: String,
    pub merged_snapshot: String,
    pub cleaned_snapshot: String,
    pub filtered_snapshot: String,

    /// Sensor type categories retained by the cleaner (source labels)
    pub allowed_pollutants: Vec<String>,

    /// Display name the filtered snapshot is restricted to
    pub target_pollutant: String,

    /// Date formats of the upstream source
    pub reading_date_format: String,
    pub station_date_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_offset: DEFAULT_MAX_OFFSET,
            stations_file: PathBuf::from(STATIONS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            raw_snapshot: RAW_SNAPSHOT_FILE.to_string(),
            merged_snapshot: MERGED_SNAPSHOT_FILE.to_string(),
            cleaned_snapshot: CLEANED_SNAPSHOT_FILE.to_string(),
            filtered_snapshot: FILTERED_SNAPSHOT_FILE.to_string(),
            allowed_pollutants: ALLOWED_POLLUTANTS.iter().map(|s| s.to_string()).collect(),
            target_pollutant: DEFAULT_TARGET_POLLUTANT.to_string(),
            reading_date_format: READING_DATE_FORMAT.to_string(),
            station_date_format: STATION_DATE_FORMAT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load the configuration, layering an optional TOML file over the
    /// built-in defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&PipelineConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn raw_path(&self) -> PathBuf {
        self.output_dir.join(&self.raw_snapshot)
    }

    pub fn merged_path(&self) -> PathBuf {
        self.output_dir.join(&self.merged_snapshot)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_snapshot)
    }

    pub fn filtered_path(&self) -> PathBuf {
        self.output_dir.join(&self.filtered_snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();

        assert_eq!(config.page_size, 50_000);
        assert_eq!(config.allowed_pollutants.len(), 5);
        assert_eq!(config.target_pollutant, "Nitrogen Dioxide");
        assert_eq!(config.raw_path(), PathBuf::from("data/readings_raw.csv"));
    }

    #[test]
    fn test_load_without_file_matches_defaults() {
        let config = PipelineConfig::load(None).unwrap();

        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.max_offset, DEFAULT_MAX_OFFSET);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "page_size = 1000").unwrap();
        writeln!(file, "target_pollutant = \"Ozone\"").unwrap();

        let config = PipelineConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.page_size, 1000);
        assert_eq!(config.target_pollutant, "Ozone");
        // Untouched fields keep their defaults
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "page_size = = 1000").unwrap();

        assert!(PipelineConfig::load(Some(file.path())).is_err());
    }
}
