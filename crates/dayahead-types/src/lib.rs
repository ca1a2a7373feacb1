//! Core types for the dayahead price client.
//!
//! This crate provides the data structures shared across the workspace:
//!
//! - [`Resolution`] - Sampling interval of a price period (15, 30 or 60 minutes)
//! - [`WindowBound`] - A caller-supplied instant, zoned or naive
//! - [`QueryWindow`] - The normalized UTC query window
//! - [`PricePoint`] / [`PriceCurve`] - Decoded prices keyed by UTC instant
//! - [`Area`] - Bidding zone metadata

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dayahead/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod area;
mod error;
mod price;
mod resolution;
mod window;

pub use area::Area;
pub use error::{DayaheadError, Result};
pub use price::{PriceCurve, PricePoint};
pub use resolution::{Resolution, ResolutionParseError};
pub use window::{QueryWindow, WindowBound};
