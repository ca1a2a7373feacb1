//! Decode command implementation.
//!
//! This module decodes a market document saved to disk, which is useful for
//! replaying responses without an API key.

use crate::display::{OutputOptions, emit, parse_time_zone};
use anyhow::{Context, Result};
use dayahead_lib::prelude::*;
use dayahead_lib::PositionTracking;
use std::path::Path;

/// Decode a saved document and write its prices.
pub(crate) fn decode_file(
    path: &Path,
    resolution: Resolution,
    per_period: bool,
    output: &OutputOptions,
    quiet: bool,
) -> Result<()> {
    let tz = parse_time_zone(&output.time_zone)?;
    let document =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let tracking = if per_period {
        PositionTracking::PerPeriod
    } else {
        PositionTracking::Document
    };
    let (curve, stats) = SeriesDecoder::new(resolution)
        .with_position_tracking(tracking)
        .decode_with_stats(&document)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    if !quiet {
        eprintln!(
            "Decoded {} prices from {} periods ({} skipped, {} gaps repaired)",
            curve.len(),
            stats.periods,
            stats.skipped_periods,
            stats.repaired_gaps
        );
    }

    emit(curve, output, tz)
}
