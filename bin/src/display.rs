//! Display utilities and output formatting for the dayahead CLI.

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use clap::ValueEnum;
use dayahead_lib::prelude::*;
use dayahead_lib::display_timestamp;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Output format for price curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Table,
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Table => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Where and how a price curve is written.
pub(crate) struct OutputOptions {
    pub(crate) format: Format,
    pub(crate) path: Option<PathBuf>,
    pub(crate) time_zone: String,
    pub(crate) sort: bool,
}

/// Parse an IANA zone name.
pub(crate) fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Unknown time zone {name:?}: {e}"))
}

/// Write a curve to the output file, or stdout when no path is given.
pub(crate) fn emit(mut curve: PriceCurve, options: &OutputOptions, tz: Tz) -> Result<()> {
    if options.sort {
        curve.sort();
    }

    match &options.path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_curve(&curve, BufWriter::new(file), options.format, tz)?;
            tracing::info!(path = %path.display(), format = %options.format, "wrote prices");
        }
        None => {
            if options.format == Format::Parquet {
                bail!("Parquet output needs a file, pass --output <PATH>");
            }
            write_curve(&curve, BufWriter::new(std::io::stdout()), options.format, tz)?;
        }
    }
    Ok(())
}

/// Write a curve in the specified format.
pub(crate) fn write_curve<W: Write + Send>(
    curve: &PriceCurve,
    mut writer: W,
    format: Format,
    tz: Tz,
) -> Result<()> {
    match format {
        Format::Table => write_table(curve, &mut writer, tz)?,
        Format::Csv => {
            let formatter = CsvFormatter::new().with_time_zone(tz);
            formatter.write_prices(curve, &mut writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new().with_time_zone(tz);
            formatter.write_prices(curve, &mut writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson().with_time_zone(tz);
            formatter.write_prices(curve, &mut writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new().with_time_zone(tz);
                formatter.write_prices(curve, &mut writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(curve: &PriceCurve, writer: &mut W, tz: Tz) -> std::io::Result<()> {
    if curve.is_empty() {
        writeln!(writer, "No prices found.")?;
        return Ok(());
    }

    writeln!(writer, "{:<28} {:>12}", "TIMESTAMP", "PRICE")?;
    writeln!(writer, "{}", "-".repeat(41))?;

    for point in curve {
        writeln!(
            writer,
            "{:<28} {:>12}",
            display_timestamp(point.timestamp, tz),
            point.price
        )?;
    }

    writeln!(writer, "\nTotal: {} prices", curve.len())
}
