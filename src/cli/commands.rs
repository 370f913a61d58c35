use tracing_subscriber::EnvFilter;

use crate::analyzers::AirQualityAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetchers::PaginatedFetcher;
use crate::models::{CleanedRecord, Reading};
use crate::processors::{RecordCleaner, StationMerger};
use crate::readers::StationReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let mut config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            stations_file,
            output_dir,
            page_size,
            max_offset,
            pollutant,
            quiet,
        } => {
            if let Some(path) = stations_file {
                config.stations_file = path;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(size) = page_size {
                config.page_size = size;
            }
            if let Some(ceiling) = max_offset {
                config.max_offset = ceiling;
            }
            if let Some(name) = pollutant {
                config.target_pollutant = name;
            }

            let readings = fetch_readings(&config, quiet).await?;

            std::fs::create_dir_all(&config.output_dir)?;
            let raw_path = config.raw_path();
            CsvWriter::new().write_records(&readings, &raw_path)?;
            println!("Raw snapshot: {} ({} rows)", raw_path.display(), readings.len());

            process_readings(&config, readings)?;
        }

        Commands::Fetch {
            output_file,
            page_size,
            max_offset,
            quiet,
        } => {
            if let Some(size) = page_size {
                config.page_size = size;
            }
            if let Some(ceiling) = max_offset {
                config.max_offset = ceiling;
            }

            let readings = fetch_readings(&config, quiet).await?;

            let path = output_file.unwrap_or_else(|| config.raw_path());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            CsvWriter::new().write_records(&readings, &path)?;
            println!("Raw snapshot: {} ({} rows)", path.display(), readings.len());
        }

        Commands::Process {
            input_file,
            stations_file,
            output_dir,
            pollutant,
        } => {
            if let Some(path) = stations_file {
                config.stations_file = path;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(name) = pollutant {
                config.target_pollutant = name;
            }

            let input = input_file.unwrap_or_else(|| config.raw_path());
            println!("Processing raw snapshot {}", input.display());

            let readings: Vec<Reading> = CsvWriter::new().read_records(&input)?;
            println!("Loaded {} readings", readings.len());

            std::fs::create_dir_all(&config.output_dir)?;
            process_readings(&config, readings)?;
        }

        Commands::Info {
            file,
            pollutant,
            json,
            sample,
        } => {
            let path = file.unwrap_or_else(|| config.cleaned_path());

            let writer = CsvWriter::new();
            let records: Vec<CleanedRecord> = writer.read_records(&path)?;
            let stats = AirQualityAnalyzer::new().analyze_records(&records, pollutant.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Analyzing snapshot: {}", path.display());
            println!("\n{}", stats.detailed_summary());

            let file_info = writer.get_file_info(&path)?;
            println!("\nFile Details:\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing {} records):", sample);
                for (i, record) in records.iter().take(sample).enumerate() {
                    println!(
                        "{}. {} at {} on {}: {:.1} {}",
                        i + 1,
                        record.sensor_symbol,
                        record.station_name,
                        record.date,
                        record.value,
                        record.unit_measure
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn fetch_readings(config: &PipelineConfig, quiet: bool) -> Result<Vec<Reading>> {
    println!("Fetching readings from {}", config.endpoint_url);

    let progress = ProgressReporter::new_spinner("Fetching pages...", quiet);
    let fetcher = PaginatedFetcher::from_config(config);
    let report = fetcher.fetch_all(Some(&progress)).await?;
    progress.finish_with_message(&format!(
        "Fetched {} rows in {} requests",
        report.readings.len(),
        report.requests_issued
    ));

    if report.hit_ceiling {
        println!("Warning: fetch stopped at the offset ceiling; the dataset may be truncated");
    }

    Ok(report.readings)
}

/// Merge, clean and filter the given readings, persisting a snapshot at
/// each stage boundary. A failure mid-way leaves exactly the snapshots
/// the completed stages wrote.
fn process_readings(config: &PipelineConfig, readings: Vec<Reading>) -> Result<()> {
    let writer = CsvWriter::new();

    println!(
        "Loading station metadata from {}",
        config.stations_file.display()
    );
    let stations = StationReader::new().read_stations_map(&config.stations_file)?;
    println!("Loaded {} stations", stations.len());

    let merged = StationMerger::new().merge(&readings, &stations);
    let merged_path = config.merged_path();
    writer.write_records(&merged, &merged_path)?;
    println!("Merged snapshot: {} ({} rows)", merged_path.display(), merged.len());

    let (cleaned, report) = RecordCleaner::from_config(config).clean(&merged)?;
    println!("\n{}\n", report.summary());

    let cleaned_path = config.cleaned_path();
    writer.write_records(&cleaned, &cleaned_path)?;
    println!(
        "Cleaned snapshot: {} ({} rows)",
        cleaned_path.display(),
        cleaned.len()
    );

    // Single-pollutant snapshot for the downstream seasonal analysis
    let filtered: Vec<CleanedRecord> = cleaned
        .into_iter()
        .filter(|r| r.sensor_name == config.target_pollutant)
        .collect();
    let filtered_path = config.filtered_path();
    writer.write_records(&filtered, &filtered_path)?;
    println!(
        "Filtered snapshot ({}): {} ({} rows)",
        config.target_pollutant,
        filtered_path.display(),
        filtered.len()
    );

    println!("Pipeline complete!");
    Ok(())
}
