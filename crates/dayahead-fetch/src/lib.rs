//! HTTP transport and document decoding for the dayahead price client.
//!
//! This crate provides the retrieval pipeline:
//!
//! - [`url::day_ahead_url`] - Constructs ENTSO-E query URLs
//! - [`Transport`] / [`HttpTransport`] - Fetches document bytes
//! - [`decode`] / [`SeriesDecoder`] - Turns a market document into a [`PriceCurve`](dayahead_types::PriceCurve)
//! - [`fetch_day_ahead_prices`] / [`DayAheadClient`] - The whole pipeline

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dayahead/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decode;
mod prices;
pub mod url;

pub use client::{ClientConfig, HttpTransport, Transport, TransportError};
pub use decode::{DecodeError, DecodeStats, PositionTracking, SeriesDecoder, decode};
pub use prices::{DayAheadClient, DayAheadQuery, fetch_day_ahead_prices};
