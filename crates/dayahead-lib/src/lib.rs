//! Rust library for retrieving ENTSO-E day-ahead electricity prices.
//!
//! This is a facade crate that re-exports functionality from the dayahead
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use dayahead_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let area = AreaRegistry::global().resolve("de-lu")?;
//!     let client = DayAheadClient::new(std::env::var("ENTSOE_API_KEY")?)?;
//!
//!     let query = DayAheadQuery::new(area).with_resolution(Resolution::Minute15);
//!     let mut curve = client.prices(&query).await?;
//!     curve.sort();
//!
//!     for (timestamp, price) in curve.iter() {
//!         println!("{timestamp}: {price}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dayahead/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use dayahead_types::*;

// Re-export area registry
pub use dayahead_areas::AreaRegistry;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use dayahead_fetch::{
    ClientConfig, DayAheadClient, DayAheadQuery, DecodeError, DecodeStats, HttpTransport,
    PositionTracking, SeriesDecoder, Transport, TransportError, decode, fetch_day_ahead_prices,
    url,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use dayahead_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
    display_timestamp,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use dayahead_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use dayahead_lib::prelude::*;
/// ```
pub mod prelude {
    pub use dayahead_types::{
        Area, DayaheadError, PriceCurve, PricePoint, QueryWindow, Resolution, Result,
        WindowBound,
    };

    pub use dayahead_areas::AreaRegistry;

    #[cfg(feature = "fetch")]
    pub use dayahead_fetch::{
        ClientConfig, DayAheadClient, DayAheadQuery, HttpTransport, SeriesDecoder, Transport,
        decode, fetch_day_ahead_prices,
    };

    #[cfg(feature = "format")]
    pub use dayahead_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use dayahead_format::ParquetFormatter;
}
