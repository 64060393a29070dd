use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paye_data::BracketLoader;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Validate a PAYE bracket CSV file and print the parsed bands.
///
/// The CSV file should have the following columns:
/// - tax_year: The tax year key (e.g., 2024)
/// - threshold: The cumulative upper bound of the band (empty for the
///   final unbounded band)
/// - rate: The marginal rate as a percentage (e.g., 17.5)
#[derive(Parser, Debug)]
#[command(name = "paye-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let table = BracketLoader::build(&records).context("Failed to build bracket table")?;

    for year in table.years() {
        let brackets = table.brackets_for(year).unwrap_or(&[]);
        println!("{year}: {} bands", brackets.len());

        let mut previous = Decimal::ZERO;
        for bracket in brackets {
            match bracket.threshold {
                Some(threshold) => {
                    println!("  {previous} - {threshold} @ {}%", bracket.rate);
                    previous = threshold;
                }
                None => println!("  over {previous} @ {}%", bracket.rate),
            }
        }
    }

    Ok(())
}
