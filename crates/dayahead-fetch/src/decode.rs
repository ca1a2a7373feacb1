//! Series decoding of `Publication_MarketDocument` XML.
//!
//! A day-ahead document nests `TimeSeries > Period > Point`. Each Period carries a
//! resolution and a start instant; each Point a 1-based position and a price. The
//! decoder turns positions back into absolute UTC instants for the Periods whose
//! resolution matches the requested one.
//!
//! Tags are matched on the suffix of their local name, so namespace declarations
//! and prefixes never influence the result.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use dayahead_types::{DayaheadError, PriceCurve, Resolution};
use roxmltree::{Document, Node};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

const TIME_SERIES: &str = "TimeSeries";
const PERIOD: &str = "Period";
const TIME_INTERVAL: &str = "timeInterval";
const START: &str = "start";
const RESOLUTION: &str = "resolution";
const POINT: &str = "Point";
const POSITION: &str = "position";
const PRICE_AMOUNT: &str = "price.amount";
const ACKNOWLEDGEMENT: &str = "Acknowledgement_MarketDocument";
const REASON: &str = "Reason";
const REASON_TEXT: &str = "text";

/// Fixed format of `timeInterval/start`, implicitly UTC.
const START_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Previous-position sentinel, far enough from any real position that the
/// first Point never triggers a gap repair.
const INITIAL_PREVIOUS_DELTA: i64 = -10;

/// Errors that can occur while decoding a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes are not a well-formed XML document, or a value in it cannot be parsed.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A Period or Point lacks an element it needs.
    #[error("Incomplete record: {0}")]
    IncompleteRecord(String),

    /// A Period declares a resolution other than PT15M, PT30M or PT60M.
    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),
}

impl From<DecodeError> for DayaheadError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::MalformedDocument(msg) => Self::MalformedDocument(msg),
            DecodeError::IncompleteRecord(msg) => Self::IncompleteRecord(msg),
            DecodeError::UnsupportedResolution(msg) => Self::UnsupportedResolution(msg),
        }
    }
}

/// Scope of the previous-position counter used for gap repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionTracking {
    /// One counter for the whole document, carried across Periods and TimeSeries.
    #[default]
    Document,
    /// Counter reset at the start of every Period.
    PerPeriod,
}

/// Counters describing one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Periods encountered.
    pub periods: usize,
    /// Periods skipped because their resolution differs from the requested one.
    pub skipped_periods: usize,
    /// Points decoded.
    pub points: usize,
    /// Entries synthesized by gap repair.
    pub repaired_gaps: usize,
}

/// Decodes a day-ahead price document at one resolution.
///
/// Shorthand for `SeriesDecoder::new(requested).decode(document)`.
///
/// # Errors
///
/// See [`SeriesDecoder::decode`].
pub fn decode(document: &[u8], requested: Resolution) -> Result<PriceCurve, DecodeError> {
    SeriesDecoder::new(requested).decode(document)
}

/// Decoder for day-ahead price documents.
///
/// # Gap repair
///
/// When a Point's zero-based position is exactly two past the previous decoded
/// Point's, the skipped slot is filled with the current Point's price. Gaps of any
/// other size stay unfilled. By default the previous position is tracked across the
/// whole document, so the first Point of a Period is compared with the last Point
/// of the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesDecoder {
    requested: Resolution,
    tracking: PositionTracking,
}

impl SeriesDecoder {
    /// Creates a decoder keeping only Periods of the requested resolution.
    #[must_use]
    pub const fn new(requested: Resolution) -> Self {
        Self {
            requested,
            tracking: PositionTracking::Document,
        }
    }

    /// Sets the scope of the previous-position counter.
    #[must_use]
    pub const fn with_position_tracking(mut self, tracking: PositionTracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Returns the requested resolution.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.requested
    }

    /// Decodes a document into a price curve.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MalformedDocument`] if the bytes are not UTF-8 XML, or a
    ///   start instant, position or price cannot be parsed
    /// - [`DecodeError::IncompleteRecord`] if a Point lacks its position or price,
    ///   or appears before its Period's resolution or start
    /// - [`DecodeError::UnsupportedResolution`] if a Period's resolution is not
    ///   PT15M, PT30M or PT60M
    pub fn decode(&self, document: &[u8]) -> Result<PriceCurve, DecodeError> {
        self.decode_with_stats(document).map(|(curve, _)| curve)
    }

    /// Decodes a document, also returning counters about the pass.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn decode_with_stats(
        &self,
        document: &[u8],
    ) -> Result<(PriceCurve, DecodeStats), DecodeError> {
        let text = std::str::from_utf8(document)
            .map_err(|e| DecodeError::MalformedDocument(e.to_string()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let doc =
            Document::parse(text).map_err(|e| DecodeError::MalformedDocument(e.to_string()))?;
        let root = doc.root_element();

        if tag_matches(root, ACKNOWLEDGEMENT) {
            tracing::warn!(
                reason = acknowledgement_reason(root).unwrap_or("unspecified"),
                "acknowledgement document received, no prices decoded"
            );
            return Ok((PriceCurve::new(), DecodeStats::default()));
        }

        let mut pass = DecodePass::new(self.requested, self.tracking);
        for series in elements(root).filter(|n| tag_matches(*n, TIME_SERIES)) {
            for period in elements(series).filter(|n| tag_matches(*n, PERIOD)) {
                pass.period(period)?;
            }
        }

        tracing::debug!(
            resolution = %self.requested,
            periods = pass.stats.periods,
            skipped_periods = pass.stats.skipped_periods,
            points = pass.stats.points,
            repaired_gaps = pass.stats.repaired_gaps,
            "decoded market document"
        );
        Ok((pass.curve, pass.stats))
    }
}

/// Accumulator for a single decode call.
struct DecodePass {
    requested: Resolution,
    tracking: PositionTracking,
    previous_delta: i64,
    curve: PriceCurve,
    stats: DecodeStats,
}

impl DecodePass {
    fn new(requested: Resolution, tracking: PositionTracking) -> Self {
        Self {
            requested,
            tracking,
            previous_delta: INITIAL_PREVIOUS_DELTA,
            curve: PriceCurve::new(),
            stats: DecodeStats::default(),
        }
    }

    fn period(&mut self, period: Node<'_, '_>) -> Result<(), DecodeError> {
        if self.tracking == PositionTracking::PerPeriod {
            self.previous_delta = INITIAL_PREVIOUS_DELTA;
        }
        self.stats.periods += 1;

        let mut start: Option<DateTime<Utc>> = None;
        let mut resolution: Option<Resolution> = None;

        for child in elements(period) {
            if tag_matches(child, TIME_INTERVAL) {
                for bound in elements(child).filter(|n| tag_matches(*n, START)) {
                    start = Some(parse_start(bound)?);
                }
            } else if tag_matches(child, RESOLUTION) {
                resolution = Some(parse_resolution(child)?);
            } else if tag_matches(child, POINT) {
                let Some(resolution) = resolution else {
                    return Err(DecodeError::IncompleteRecord(format!(
                        "Point at line {} precedes its Period's resolution",
                        line(child)
                    )));
                };
                if resolution != self.requested {
                    continue;
                }
                let Some(start) = start else {
                    return Err(DecodeError::IncompleteRecord(format!(
                        "Point at line {} precedes its Period's timeInterval start",
                        line(child)
                    )));
                };
                self.point(child, start, resolution.duration())?;
            }
        }

        if resolution.is_some_and(|r| r != self.requested) {
            self.stats.skipped_periods += 1;
        }
        Ok(())
    }

    fn point(
        &mut self,
        point: Node<'_, '_>,
        start: DateTime<Utc>,
        step: TimeDelta,
    ) -> Result<(), DecodeError> {
        let mut position = None;
        let mut price = None;
        for child in elements(point) {
            if tag_matches(child, POSITION) {
                position = Some(parse_position(child)?);
            } else if tag_matches(child, PRICE_AMOUNT) {
                price = Some(parse_price(child)?);
            }
        }
        let position = position.ok_or_else(|| {
            DecodeError::IncompleteRecord(format!("Point at line {} has no position", line(point)))
        })?;
        let price = price.ok_or_else(|| {
            DecodeError::IncompleteRecord(format!(
                "Point at line {} has no price.amount",
                line(point)
            ))
        })?;

        let delta = i64::from(position) - 1;
        let time = offset(start, step, delta, point)?;
        let repair = delta - self.previous_delta == 2;
        self.previous_delta = delta;

        if repair {
            let skipped = offset(start, step, delta - 1, point)?;
            self.curve.insert(skipped, price);
            self.stats.repaired_gaps += 1;
        }
        self.curve.insert(time, price);
        self.stats.points += 1;
        Ok(())
    }
}

/// Namespace-agnostic tag comparison.
fn tag_matches(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name().ends_with(name)
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn line(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

fn text<'a>(node: Node<'a, '_>) -> Result<&'a str, DecodeError> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            DecodeError::IncompleteRecord(format!(
                "{} at line {} has no text",
                node.tag_name().name(),
                line(node)
            ))
        })
}

fn offset(
    start: DateTime<Utc>,
    step: TimeDelta,
    delta: i64,
    node: Node<'_, '_>,
) -> Result<DateTime<Utc>, DecodeError> {
    i32::try_from(delta)
        .ok()
        .and_then(|d| step.checked_mul(d))
        .and_then(|shift| start.checked_add_signed(shift))
        .ok_or_else(|| {
            DecodeError::MalformedDocument(format!(
                "position at line {} is out of range",
                line(node)
            ))
        })
}

fn parse_start(node: Node<'_, '_>) -> Result<DateTime<Utc>, DecodeError> {
    let value = text(node)?;
    NaiveDateTime::parse_from_str(value, START_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            DecodeError::MalformedDocument(format!(
                "start '{value}' at line {}: {e}",
                line(node)
            ))
        })
}

fn parse_resolution(node: Node<'_, '_>) -> Result<Resolution, DecodeError> {
    let value = text(node)?;
    Resolution::from_iso8601(value)
        .ok_or_else(|| DecodeError::UnsupportedResolution(value.to_string()))
}

fn parse_position(node: Node<'_, '_>) -> Result<u32, DecodeError> {
    let value = text(node)?;
    match value.parse::<u32>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(DecodeError::MalformedDocument(format!(
            "position '{value}' at line {} is not a positive integer",
            line(node)
        ))),
    }
}

fn parse_price(node: Node<'_, '_>) -> Result<Decimal, DecodeError> {
    let value = text(node)?;
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| {
            DecodeError::MalformedDocument(format!(
                "price.amount '{value}' at line {}: {e}",
                line(node)
            ))
        })
}

fn acknowledgement_reason<'a>(root: Node<'a, '_>) -> Option<&'a str> {
    root.descendants()
        .filter(|n| tag_matches(*n, REASON))
        .flat_map(elements)
        .find(|n| tag_matches(*n, REASON_TEXT))
        .and_then(|n| n.text())
        .map(str::trim)
}
