//! JSON output format.

use chrono_tz::Tz;
use dayahead_types::{PriceCurve, PricePoint};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter, display_timestamp};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// One serialized price, with the timestamp in the display zone.
#[derive(Debug, Serialize)]
struct PriceRow {
    timestamp: String,
    price: Decimal,
}

impl PriceRow {
    fn new(point: &PricePoint, tz: Tz) -> Self {
        Self {
            timestamp: display_timestamp(point.timestamp, tz),
            price: point.price,
        }
    }
}

/// JSON formatter.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
    /// Zone timestamps are rendered in.
    time_zone: Tz,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
            time_zone: Tz::UTC,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self::new().with_style(JsonStyle::Ndjson)
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the display time zone.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_prices<W: Write + Send>(
        &self,
        curve: &PriceCurve,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let rows = curve.points().iter().map(|p| PriceRow::new(p, self.time_zone));
        match self.style {
            JsonStyle::Array => {
                let rows: Vec<_> = rows.collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &rows)?;
                } else {
                    serde_json::to_writer(&mut writer, &rows)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in rows {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_curve() -> PriceCurve {
        [
            (
                Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap(),
                "75.12".parse::<Decimal>().unwrap(),
            ),
            (
                Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                "70.5".parse::<Decimal>().unwrap(),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn render(formatter: &JsonFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_prices(&create_test_curve(), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_json_array() {
        let result = render(&JsonFormatter::new());
        assert!(result.starts_with('['));
        assert!(result.contains("\"timestamp\":\"2024-01-01T23:00:00Z\""));
        assert!(result.contains("\"price\":75.12"));
    }

    #[test]
    fn test_ndjson() {
        let result = render(&JsonFormatter::ndjson());
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('{'));

        let row: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(row["price"].as_f64(), Some(70.5));
    }

    #[test]
    fn test_json_display_zone() {
        let result = render(&JsonFormatter::new().with_time_zone(chrono_tz::Europe::Helsinki));
        assert!(result.contains("2024-01-02T01:00:00+02:00"));
    }

    #[test]
    fn test_pretty_json() {
        let result = render(&JsonFormatter::new().with_pretty(true));
        assert!(result.contains('\n'));
        assert!(result.contains("  ")); // Indentation
    }
}
