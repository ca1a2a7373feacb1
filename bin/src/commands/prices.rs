//! Prices command implementation.
//!
//! This module fetches day-ahead prices for one bidding zone and writes them
//! in the chosen format.

use crate::display::{OutputOptions, emit, parse_time_zone};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use dayahead_lib::prelude::*;
use std::time::Duration;

/// Arguments of a single price request.
pub(crate) struct PriceRequest {
    pub(crate) area: String,
    pub(crate) start: Option<WindowBound>,
    pub(crate) end: Option<WindowBound>,
    pub(crate) resolution: Resolution,
    pub(crate) clip: bool,
    pub(crate) area_tz: bool,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) timeout: u64,
}

/// Fetch prices for an area and write them.
pub(crate) async fn prices(request: PriceRequest, output: &OutputOptions, quiet: bool) -> Result<()> {
    let registry = AreaRegistry::global();
    let code = registry.resolve(&request.area)?;
    let area = registry.get(&request.area).or_else(|| registry.by_code(code));
    let tz = display_zone(area, request.area_tz, &output.time_zone)?;

    // Resolve the window once so --clip uses the same bounds as the request.
    let window = QueryWindow::normalize(request.start, request.end);
    let query = DayAheadQuery::new(code)
        .with_start(window.start)
        .with_end(window.end)
        .with_resolution(request.resolution);

    let config = ClientConfig {
        timeout: Duration::from_secs(request.timeout),
        ..ClientConfig::default()
    };
    let client = DayAheadClient::with_config(request.api_key, config)
        .context("Failed to create HTTP client")?
        .with_base_url(request.base_url);

    let label = area.map_or_else(|| code.to_string(), ToString::to_string);
    let mut curve = client
        .prices(&query)
        .await
        .with_context(|| format!("Failed to fetch prices for {label}"))?;

    if request.clip {
        curve.retain_within(&window);
    }

    if !quiet {
        eprintln!(
            "{label}: {} prices at {} for {window}",
            curve.len(),
            request.resolution
        );
    }

    emit(curve, output, tz)
}

/// Pick the display zone: the area's own zone when asked for, else `--tz`.
fn display_zone(area: Option<&Area>, area_tz: bool, fallback: &str) -> Result<Tz> {
    match area {
        Some(area) if area_tz => parse_time_zone(area.time_zone()),
        None if area_tz => {
            tracing::warn!("area is not in the registry, rendering timestamps in {fallback}");
            parse_time_zone(fallback)
        }
        _ => parse_time_zone(fallback),
    }
}
