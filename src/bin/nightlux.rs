use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nightlux::{
    display::SeriesDisplayExt, generate_illuminance_series, CalendarDate, IlluminanceConfig,
    IlluminanceError, ObserverLocation,
};

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Full,
    Json,
}

#[derive(Parser)]
#[command(name = "nightlux")]
#[command(about = "Ground illuminance from the Sun and the Moon over one day")]
struct Cli {
    /// UTC calendar date, YYYY-MM-DD
    #[arg(long)]
    date: CalendarDate,

    /// Offset of the local time labels from UTC, in hours
    #[arg(long, default_value = "9.0", allow_negative_numbers = true)]
    tz_offset: f64,

    /// Observer latitude in degrees, north positive
    #[arg(long, default_value = "37.5665", allow_negative_numbers = true)]
    lat: f64,

    /// Observer longitude in degrees, east positive
    #[arg(long, default_value = "126.978", allow_negative_numbers = true)]
    lon: f64,

    /// JSON file overriding the model coefficients
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if !(-14.0..=14.0).contains(&cli.tz_offset) {
        return Err(IlluminanceError::TimezoneOffsetOutOfRange(cli.tz_offset).into());
    }
    let location = ObserverLocation::try_new(cli.lat, cli.lon)?;

    let config = match &cli.config {
        Some(path) => {
            log::info!("loading model coefficients from {}", path.display());
            IlluminanceConfig::from_json_file(path)?
        }
        None => IlluminanceConfig::default(),
    };

    let samples = generate_illuminance_series(cli.date, cli.tz_offset, location, &config)?;

    match cli.format {
        OutputFormat::Table => println!("{}", samples.show()),
        OutputFormat::Full => println!("{}", samples.table_full()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
    }

    Ok(())
}
