use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use nearby_institutes::error::ExportError;
use nearby_institutes::export::{OutputFormat, write_table};
use nearby_institutes::extract::Field;
use nearby_institutes::logging::init_logging;
use nearby_institutes::table::{build_table, load_records};

/// Extract fields from a JSON file to CSV or XLSX
///
/// Examples:
///   json-to-table -i cambridge.json -o names.csv
///   json-to-table -i nearby-institute.json -o names_addresses.csv --fields name,address
///   json-to-table -i nearby-institute.json -o nearby-names.xlsx --xlsx --fields name,address,category
#[derive(Parser, Debug)]
#[command(name = "json-to-table")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input JSON file path
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file path (CSV or XLSX)
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Write an Excel .xlsx file instead of CSV
    #[arg(long)]
    xlsx: bool,

    /// Comma-separated fields to extract, e.g. name,address,phone,category
    #[arg(long, default_value = "name")]
    fields: String,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let records = load_records(&args.input)?;
    let fields = Field::parse_list(&args.fields);
    tracing::debug!(records = records.len(), ?fields, "extracting fields");

    let table = build_table(&records, &fields);

    let format = if args.xlsx || OutputFormat::from_path(&args.output) == OutputFormat::Xlsx {
        OutputFormat::Xlsx
    } else {
        OutputFormat::Csv
    };

    match write_table(&table, &args.output, format) {
        Ok(()) => {}
        Err(e @ ExportError::XlsxUnavailable) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to write {}", args.output.display()));
        }
    }

    let names: Vec<&str> = fields.iter().map(Field::as_str).collect();
    println!(
        "Wrote {} rows with fields {:?} to {}",
        table.len(),
        names,
        args.output.display()
    );

    Ok(())
}
