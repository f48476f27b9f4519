use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use nearby_institutes::api::locator::{DEFAULT_CENTER, Origin};
use nearby_institutes::api::{Locator, SearchMode, build_query, fetch_elements};
use nearby_institutes::config::{DEFAULT_OUTPUT, DEFAULT_RADIUS, Settings};
use nearby_institutes::error::ExportError;
use nearby_institutes::export::{OutputFormat, save_records};
use nearby_institutes::logging::init_logging;
use nearby_institutes::osm::parse_elements;

/// Find nearby educational institutions using the OpenStreetMap Overpass API
///
/// Examples:
///   # Search around the default location (Dhaka) and write results.csv
///   nearby-institutes
///
///   # Geocode a place name and search 3km around it
///   nearby-institutes -l "Shonir Akhra" -r 3000 -o res.csv
///
///   # Explicit coordinates, loose matching, JSON output
///   nearby-institutes --lat 23.7104 --lon 90.4074 --mode loose -o nearby.json
///
///   # Locate by public IP
///   nearby-institutes --ip
#[derive(Parser, Debug)]
#[command(name = "nearby-institutes")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches nearby-institutes.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Location string to geocode (e.g. "Boston, MA")
    #[arg(short = 'l', long)]
    location: Option<String>,

    /// Search radius in meters [default: 2000]
    #[arg(short = 'r', long)]
    radius: Option<u32>,

    /// Output file (CSV, JSON or XLSX) [default: results.csv]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format (inferred from the output extension when omitted;
    /// a .json output file is always written as JSON)
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Explicit latitude (use with --lon)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Explicit longitude (use with --lat)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Match only explicit institution tags (strict) or also name keywords (loose)
    #[arg(short = 'm', long, value_enum)]
    mode: Option<SearchMode>,

    /// Locate by public IP instead of the default coordinates
    #[arg(long)]
    ip: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::resolve(args.config.as_deref())?;

    let location = args.location.clone().or_else(|| settings.location.clone());
    let lat = args.lat.or(settings.lat);
    let lon = args.lon.or(settings.lon);
    let radius = args.radius.or(settings.radius).unwrap_or(DEFAULT_RADIUS);
    let mode = args.mode.or(settings.mode).unwrap_or_default();
    let output = args
        .output
        .clone()
        .or_else(|| settings.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let format = OutputFormat::for_output(args.format.or(settings.format), &output);

    tracing::debug!(radius, ?mode, ?format, output = %output.display(), "configuration");

    let (lat, lon) = match Origin::choose(location.as_deref(), lat, lon, args.ip) {
        Origin::Explicit(lat, lon) => {
            println!("Using explicit coordinates from command line: {}, {}", lat, lon);
            (lat, lon)
        }
        Origin::Default => {
            let (lat, lon) = DEFAULT_CENTER;
            println!("Using default hardcoded coordinates (Dhaka): {}, {}", lat, lon);
            (lat, lon)
        }
        Origin::Lookup(location) => {
            let locator = Locator::new(&settings);
            let spinner = create_spinner(match location {
                Some(_) => "Geocoding location...",
                None => "Looking up location by IP...",
            });
            let start = Instant::now();
            let coords = locator
                .resolve(location.as_deref())
                .context("Failed to determine search location")?;
            spinner.finish_with_message(format!(
                "Using determined coordinates: {}, {} [{:.1}s]",
                coords.0,
                coords.1,
                start.elapsed().as_secs_f32()
            ));
            coords
        }
    };

    let query = build_query(lat, lon, radius, mode);
    tracing::debug!(%query, "Overpass query");

    let spinner = create_spinner("Querying Overpass API...");
    let start = Instant::now();
    let elements = fetch_elements(
        &settings.endpoints.overpass,
        &query,
        &settings.user_agent(),
        Duration::from_secs(settings.timeouts.overpass_secs),
    )
    .context("Failed to fetch institutes from Overpass API")?;
    spinner.finish_with_message(format!(
        "Found {} raw elements from Overpass [{:.1}s]",
        elements.len(),
        start.elapsed().as_secs_f32()
    ));

    let results = parse_elements(&elements, mode);
    println!("Parsed {} institutes with names", results.len());

    match save_records(&results, &output, format) {
        Ok(()) => {}
        Err(e @ ExportError::XlsxUnavailable) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to write {}", output.display()));
        }
    }

    println!("Saved {} results to {}", results.len(), output.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
