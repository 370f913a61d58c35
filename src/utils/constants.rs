/// Upstream open-data endpoint (CSV export with `$limit`/`$offset` paging)
pub const DEFAULT_ENDPOINT_URL: &str = "https://www.dati.lombardia.it/resource/nicp-bhqi.csv";

/// Pagination defaults
pub const DEFAULT_PAGE_SIZE: u64 = 50_000;
pub const DEFAULT_MAX_OFFSET: u64 = 30_000_000;

/// Sentinel the upstream source uses for an invalid/missing measurement
pub const SENTINEL_VALUE: f64 = -9999.0;

/// Date formats used by the upstream source
pub const READING_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const STATION_DATE_FORMAT: &str = "%d/%m/%Y";

/// File names
pub const STATIONS_FILE: &str = "data/stations.csv";
pub const RAW_SNAPSHOT_FILE: &str = "readings_raw.csv";
pub const MERGED_SNAPSHOT_FILE: &str = "readings_merged.csv";
pub const CLEANED_SNAPSHOT_FILE: &str = "readings_clean.csv";
pub const FILTERED_SNAPSHOT_FILE: &str = "readings_no2.csv";

/// Directory names
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Columns expected in every fetched page (schema drift fails loudly)
pub const EXPECTED_READING_COLUMNS: [&str; 5] =
    ["idsensore", "data", "valore", "idoperatore", "unitamisura"];

/// Sensor type categories retained by the cleaner (source-language labels)
pub const ALLOWED_POLLUTANTS: [&str; 5] = [
    "Biossido di Azoto",
    "Biossido di Zolfo",
    "Ozono",
    "PM10 (SM2005)",
    "Particelle sospese PM2.5",
];

/// Pollutant the filtered snapshot is restricted to
pub const DEFAULT_TARGET_POLLUTANT: &str = "Nitrogen Dioxide";
