//! Areas command implementation.
//!
//! This module handles listing known bidding zones with optional filtering.

use anyhow::Result;
use dayahead_lib::prelude::*;

/// List known bidding zones, optionally filtered by a search pattern.
pub(crate) fn list_areas(search: Option<&str>) -> Result<()> {
    let registry = AreaRegistry::global();

    let areas: Vec<_> = match search {
        Some(pattern) => registry.search(pattern),
        None => {
            let mut all: Vec<_> = registry.all().collect();
            all.sort_by(|a, b| a.id().cmp(b.id()));
            all
        }
    };

    if areas.is_empty() {
        println!("No areas found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<18} {:<24} {:<18}",
        "ID", "CODE", "NAME", "TIME ZONE"
    );
    println!("{}", "-".repeat(72));

    for area in &areas {
        println!(
            "{:<10} {:<18} {:<24} {:<18}",
            area.id(),
            area.code(),
            area.name(),
            area.time_zone()
        );
    }

    println!("\nTotal: {} areas", areas.len());
    Ok(())
}
