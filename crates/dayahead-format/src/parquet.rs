//! Apache Parquet output format.

use arrow::array::{Float64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono_tz::Tz;
use dayahead_types::{PriceCurve, PricePoint};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
///
/// Timestamps are stored as UTC microseconds tagged with the display zone, so
/// readers such as pandas or polars present them in that zone.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
    /// Zone recorded in the timestamp column type.
    time_zone: Tz,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
            time_zone: Tz::UTC,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the display time zone.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Creates the Arrow schema for price data.
    fn price_schema(&self) -> Schema {
        Schema::new(vec![
            Field::new(
                "timestamp",
                DataType::Timestamp(TimeUnit::Microsecond, Some(self.time_zone.name().into())),
                false,
            ),
            Field::new("price", DataType::Float64, false),
        ])
    }

    /// Converts price points to an Arrow RecordBatch.
    fn points_to_batch(&self, points: &[PricePoint]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = points
            .iter()
            .map(|p| p.timestamp.timestamp_micros())
            .collect();
        let prices: Vec<_> = points
            .iter()
            .map(|p| p.price.to_f64().unwrap_or(f64::NAN))
            .collect();

        RecordBatch::try_new(
            Arc::new(self.price_schema()),
            vec![
                Arc::new(
                    TimestampMicrosecondArray::from(timestamps)
                        .with_timezone(self.time_zone.name()),
                ),
                Arc::new(Float64Array::from(prices)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_prices<W: Write + Send>(
        &self,
        curve: &PriceCurve,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(self.price_schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in curve.points().chunks(self.row_group_size) {
            let batch = self.points_to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
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
            Decimal::from(75),
        );
        curve
    }

    #[test]
    fn test_parquet_prices() {
        let formatter = ParquetFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_prices(&create_test_curve(), &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_price_schema_carries_zone() {
        let formatter = ParquetFormatter::new().with_time_zone(chrono_tz::Europe::Oslo);
        let schema = formatter.price_schema();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(
            schema.field_with_name("timestamp").unwrap().data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, Some("Europe/Oslo".into()))
        );
        assert!(schema.field_with_name("price").is_ok());
    }
}
