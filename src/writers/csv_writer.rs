use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes and reads the pipeline's CSV snapshots.
///
/// A write is a plain overwrite of whatever is at the path: the pipeline
/// is the only writer and snapshots are rebuilt from scratch each run,
/// so no atomic rename or backup rotation is kept.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write records to a CSV file with a header row, overwriting any
    /// existing file at the path.
    pub fn write_records<T: Serialize>(&self, records: &[T], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Read a snapshot back into typed records
    pub fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }

        Ok(records)
    }

    /// Row count and size of a snapshot on disk
    pub fn get_file_info(&self, path: &Path) -> Result<SnapshotInfo> {
        let file_size_bytes = std::fs::metadata(path)?.len();

        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);
        let mut total_rows: u64 = 0;
        for record in reader.records() {
            record?;
            total_rows += 1;
        }

        Ok(SnapshotInfo {
            path: path.to_path_buf(),
            total_rows,
            file_size_bytes,
        })
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct SnapshotInfo {
    pub path: PathBuf,
    pub total_rows: u64,
    pub file_size_bytes: u64,
}

impl SnapshotInfo {
    pub fn summary(&self) -> String {
        format!(
            "File: {}\n\
            Rows: {}\n\
            Size: {:.1} KB",
            self.path.display(),
            self.total_rows,
            self.file_size_bytes as f64 / 1024.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_readings() -> Vec<Reading> {
        vec![
            Reading::new(
                10431,
                "09/03/2015 14:00:00".to_string(),
                54.2,
                1,
                "µg/m³".to_string(),
            ),
            Reading::new(
                10435,
                "09/03/2015 14:00:00".to_string(),
                -9999.0,
                1,
                "µg/m³".to_string(),
            ),
        ]
    }

    #[test]
    fn test_round_trip_preserves_rows_and_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.csv");
        let writer = CsvWriter::new();
        let readings = sample_readings();

        writer.write_records(&readings, &path).unwrap();
        let restored: Vec<Reading> = writer.read_records(&path).unwrap();

        assert_eq!(restored, readings);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.csv");
        let writer = CsvWriter::new();

        writer.write_records(&sample_readings(), &path).unwrap();
        writer
            .write_records(&sample_readings()[..1], &path)
            .unwrap();

        let restored: Vec<Reading> = writer.read_records(&path).unwrap();
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn test_file_info_counts_data_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.csv");
        let writer = CsvWriter::new();

        writer.write_records(&sample_readings(), &path).unwrap();
        let info = writer.get_file_info(&path).unwrap();

        assert_eq!(info.total_rows, 2);
        assert!(info.file_size_bytes > 0);
        assert!(info.summary().contains("Rows: 2"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let writer = CsvWriter::new();
        let result: Result<Vec<Reading>> = writer.read_records(Path::new("missing.csv"));

        assert!(result.is_err());
    }
}
