use std::collections::HashMap;
use std::io::Write;

use aria_processor::fetchers::PaginatedFetcher;
use aria_processor::models::{CleanedRecord, MergedRecord, Reading, Station};
use aria_processor::processors::{RecordCleaner, StationMerger};
use aria_processor::readers::StationReader;
use aria_processor::writers::CsvWriter;
use tempfile::TempDir;

const PAGE_HEADER: &str = "idsensore,data,valore,idoperatore,unitamisura";
const STATIONS_HEADER: &str = "idsensore,nometiposensore,idstazione,nomestazione,quota,provincia,comune,storico,datastart,datastop,lat,lng";

fn page_of(rows: &[&str]) -> String {
    let mut body = String::from(PAGE_HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}

#[tokio::test]
async fn test_pipeline_end_to_end_offline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    // Two full pages, one short page, then the terminating empty page.
    // Sensor 3 has no station; sensor 4 measures an off-list category;
    // two rows carry the -9999 sentinel.
    let pages = vec![
        page_of(&[
            "1,09/03/2015 08:00:00,54.2,1,µg/m³",
            "1,09/03/2015 09:00:00,-9999,1,µg/m³",
        ]),
        page_of(&[
            "2,09/03/2015 08:00:00,81.0,1,µg/m³",
            "3,09/03/2015 08:00:00,12.5,1,µg/m³",
        ]),
        page_of(&["4,09/03/2015 08:00:00,-9999,1,mg/m³"]),
        String::new(),
    ];

    let fetcher = PaginatedFetcher::new("http://unused.invalid").with_page_size(2);
    let report = fetcher
        .fetch_all_with(
            |offset, _limit| {
                let body = pages.get((offset / 2) as usize).cloned().unwrap_or_default();
                async move { Ok(body) }
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(report.requests_issued, 4);
    assert_eq!(report.readings.len(), 5);

    // Write and re-read the raw snapshot
    let writer = CsvWriter::new();
    let raw_path = temp_dir.path().join("readings_raw.csv");
    writer.write_records(&report.readings, &raw_path).unwrap();
    let readings: Vec<Reading> = writer.read_records(&raw_path).unwrap();
    assert_eq!(readings.len(), 5);

    // Station reference file: sensors 1, 2 and 4 are known
    let stations_path = temp_dir.path().join("stations.csv");
    {
        let mut file = std::fs::File::create(&stations_path).unwrap();
        writeln!(file, "{}", STATIONS_HEADER).unwrap();
        writeln!(file, "1,Biossido di Azoto,501,Milano - Viale Marche,122,MI,Milano,N,11/11/1998,,45.496,9.193").unwrap();
        writeln!(file, "2,Ozono,502,Cantù - Via Meucci,369,CO,Cantù,N,01/01/2001,,45.738,9.128").unwrap();
        writeln!(file, "4,Monossido di Carbonio,503,Lecco - Via Amendola,214,LC,Lecco,N,01/01/2001,,45.853,9.397").unwrap();
    }
    let stations: HashMap<u32, Station> = StationReader::new()
        .read_stations_map(&stations_path)
        .unwrap();

    // Merge preserves left cardinality; sensor 3 keeps null station fields
    let merged = StationMerger::new().merge(&readings, &stations);
    assert_eq!(merged.len(), readings.len());
    let orphan = merged.iter().find(|m| m.idsensore == 3).unwrap();
    assert!(!orphan.has_station());

    let merged_path = temp_dir.path().join("readings_merged.csv");
    writer.write_records(&merged, &merged_path).unwrap();
    let merged_restored: Vec<MergedRecord> = writer.read_records(&merged_path).unwrap();
    assert_eq!(merged_restored.len(), merged.len());

    // Clean: sentinels dropped, off-list and unmatched rows discarded
    let (cleaned, cleaning_report) = RecordCleaner::new().clean(&merged).unwrap();
    assert_eq!(cleaning_report.total_rows, 5);
    assert_eq!(cleaning_report.invalid_values, 2);
    assert_eq!(cleaning_report.valid_values, 3);
    assert!(cleaned.iter().all(|r| r.value != -9999.0));

    let names: Vec<&str> = cleaned.iter().map(|r| r.sensor_name.as_str()).collect();
    assert_eq!(names, vec!["Nitrogen Dioxide", "Ozone"]);

    // Cleaned snapshot round-trip
    let cleaned_path = temp_dir.path().join("readings_clean.csv");
    writer.write_records(&cleaned, &cleaned_path).unwrap();
    let restored: Vec<CleanedRecord> = writer.read_records(&cleaned_path).unwrap();
    assert_eq!(restored.len(), cleaned.len());
    let restored_values: Vec<f64> = restored.iter().map(|r| r.value).collect();
    assert_eq!(restored_values, vec![54.2, 81.0]);

    // Single-pollutant snapshot
    let filtered: Vec<CleanedRecord> = restored
        .into_iter()
        .filter(|r| r.sensor_name == "Nitrogen Dioxide")
        .collect();
    let filtered_path = temp_dir.path().join("readings_no2.csv");
    writer.write_records(&filtered, &filtered_path).unwrap();

    let info = writer.get_file_info(&filtered_path).unwrap();
    assert_eq!(info.total_rows, 1);
}

#[test]
fn test_merge_keeps_unmatched_rows_with_null_lookup_columns() {
    // Fetched table [1, 2, 3] against a lookup containing only 1 and 2
    let readings: Vec<Reading> = [1u32, 2, 3]
        .iter()
        .map(|id| {
            Reading::new(
                *id,
                "09/03/2015 08:00:00".to_string(),
                10.0,
                1,
                "µg/m³".to_string(),
            )
        })
        .collect();

    let stations: HashMap<u32, Station> = [1u32, 2]
        .iter()
        .map(|id| {
            (
                *id,
                Station::new(
                    *id,
                    "Biossido di Azoto".to_string(),
                    500 + *id,
                    format!("Station {}", id),
                    100,
                    "MI".to_string(),
                    "Milano".to_string(),
                    "N".to_string(),
                    "11/11/1998".to_string(),
                    None,
                    45.5,
                    9.2,
                ),
            )
        })
        .collect();

    let merged = StationMerger::new().merge(&readings, &stations);

    assert_eq!(merged.len(), 3);
    assert!(merged[0].has_station());
    assert!(merged[1].has_station());
    assert!(!merged[2].has_station());
    assert!(merged[2].nomestazione.is_none());
}
