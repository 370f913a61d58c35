use std::collections::HashMap;
use tracing::debug;

use crate::models::{MergedRecord, Reading, Station};

/// Left-joins fetched readings with station metadata on `idsensore`.
pub struct StationMerger;

impl StationMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge readings with their stations.
    ///
    /// Every reading produces exactly one output row, in input order; a
    /// reading without a matching station keeps null station fields.
    /// Both join sides are `u32`, so a match is exact or absent — there
    /// is no silent zero-match failure mode from mismatched key types.
    pub fn merge(
        &self,
        readings: &[Reading],
        stations: &HashMap<u32, Station>,
    ) -> Vec<MergedRecord> {
        let mut matched = 0usize;

        let merged: Vec<MergedRecord> = readings
            .iter()
            .map(|reading| {
                let station = stations.get(&reading.idsensore);
                if station.is_some() {
                    matched += 1;
                }
                MergedRecord::from_parts(reading, station)
            })
            .collect();

        debug!(
            total = merged.len(),
            matched,
            unmatched = merged.len() - matched,
            "merged readings with station metadata"
        );

        merged
    }
}

impl Default for StationMerger {
    fn default() -> Self {
        Self::new()
    }
}
