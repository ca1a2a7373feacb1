//! CSV output format.

use chrono_tz::Tz;
use dayahead_types::PriceCurve;
use std::io::Write;

use crate::{FormatError, Formatter, display_timestamp};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
    /// Zone timestamps are rendered in.
    time_zone: Tz,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
            time_zone: Tz::UTC,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets the display time zone.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }
}

impl Formatter for CsvFormatter {
    fn write_prices<W: Write + Send>(
        &self,
        curve: &PriceCurve,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}price")?;
        }

        for point in curve {
            writeln!(
                writer,
                "{}{d}{}",
                display_timestamp(point.timestamp, self.time_zone),
                point.price
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn create_test_curve() -> PriceCurve {
        let mut curve = PriceCurve::new();
        curve.insert(
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap(),
            "75.12".parse::<Decimal>().unwrap(),
        );
        curve.insert(
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            Decimal::from(-5),
        );
        curve
    }

    fn render(formatter: &CsvFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_prices(&create_test_curve(), &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_csv_prices() {
        let result = render(&CsvFormatter::new());
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines,
            vec![
                "timestamp,price",
                "2024-01-01T23:00:00Z,75.12",
                "2024-01-02T00:00:00Z,-5",
            ]
        );
    }

    #[test]
    fn test_csv_display_zone() {
        let result = render(&CsvFormatter::new().with_time_zone(chrono_tz::Europe::Prague));
        assert!(result.contains("2024-01-02T00:00:00+01:00,75.12"));
    }

    #[test]
    fn test_csv_no_header() {
        let result = render(&CsvFormatter::new().with_header(false));
        assert!(!result.contains("timestamp,price"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        assert!(render(&formatter).contains("timestamp\tprice"));
        assert_eq!(formatter.extension(), "tsv");
    }
}
