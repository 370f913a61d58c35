use encoding_rs::WINDOWS_1252;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::models::Station;

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read station metadata from the local reference CSV.
    ///
    /// The file is read verbatim: no filtering, no transformation. A
    /// missing or malformed file propagates as a fatal error.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let bytes = fs::read(path)?;
        let text = decode_reference_bytes(&bytes, path)?;

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let mut stations = Vec::new();

        for record in reader.deserialize() {
            let station: Station = record?;
            stations.push(station);
        }

        Ok(stations)
    }

    /// Read station metadata keyed by the `idsensore` join key.
    ///
    /// The key is documented unique; if the file nevertheless carries a
    /// duplicate, the first occurrence wins so the merger's left
    /// cardinality cannot be inflated.
    pub fn read_stations_map(&self, path: &Path) -> Result<HashMap<u32, Station>> {
        let stations = self.read_stations(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            if map.contains_key(&station.idsensore) {
                warn!(
                    idsensore = station.idsensore,
                    "duplicate join key in station reference file, keeping first occurrence"
                );
                continue;
            }
            map.insert(station.idsensore, station);
        }

        Ok(map)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the reference file as UTF-8, falling back to Windows-1252.
///
/// Exports of the station registry circulate in both encodings; the
/// Italian station and municipality names make a silent mojibake pass
/// unacceptable.
fn decode_reference_bytes(bytes: &[u8], path: &Path) -> Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (text, _, had_errors) = WINDOWS_1252.decode(bytes);
            if had_errors {
                return Err(PipelineError::InvalidFormat(format!(
                    "station file {} is neither valid UTF-8 nor Windows-1252",
                    path.display()
                )));
            }
            Ok(text.into_owned())
        }
    }
}
