use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aria-processor")]
#[command(about = "Air quality sensor data pipeline for the Lombardy open data portal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Pipeline configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: fetch, merge, clean, filter
    Run {
        #[arg(short, long, help = "Station metadata CSV file")]
        stations_file: Option<PathBuf>,

        #[arg(short, long, help = "Directory for the output snapshots")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "Rows requested per page")]
        page_size: Option<u64>,

        #[arg(long, help = "Safety ceiling for the pagination offset")]
        max_offset: Option<u64>,

        #[arg(long, help = "Pollutant display name for the filtered snapshot")]
        pollutant: Option<String>,

        #[arg(long, default_value = "false", help = "Suppress progress output")]
        quiet: bool,
    },

    /// Fetch readings and write the raw snapshot only
    Fetch {
        #[arg(short, long, help = "Output file for the raw snapshot")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Rows requested per page")]
        page_size: Option<u64>,

        #[arg(long, help = "Safety ceiling for the pagination offset")]
        max_offset: Option<u64>,

        #[arg(long, default_value = "false", help = "Suppress progress output")]
        quiet: bool,
    },

    /// Merge, clean and filter an existing raw snapshot (no network)
    Process {
        #[arg(short, long, help = "Raw snapshot to process")]
        input_file: Option<PathBuf>,

        #[arg(short, long, help = "Station metadata CSV file")]
        stations_file: Option<PathBuf>,

        #[arg(short, long, help = "Directory for the output snapshots")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "Pollutant display name for the filtered snapshot")]
        pollutant: Option<String>,
    },

    /// Display statistics about a cleaned snapshot
    Info {
        #[arg(short, long, help = "Cleaned snapshot file")]
        file: Option<PathBuf>,

        #[arg(short, long, help = "Restrict the analysis to one pollutant display name")]
        pollutant: Option<String>,

        #[arg(long, default_value = "false", help = "Emit the statistics as JSON")]
        json: bool,

        #[arg(short, long, default_value = "0", help = "Show this many sample records")]
        sample: usize,
    },
}
