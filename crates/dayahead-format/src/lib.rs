//! Output formatters for the dayahead price client.
//!
//! This crate provides formatters for writing price curves to various output
//! formats, with timestamps rendered in a display time zone:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dayahead/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, display_timestamp};
pub use json::{JsonFormatter, JsonStyle};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;

impl From<FormatError> for dayahead_types::DayaheadError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => Self::Io(e),
            FormatError::Json(e) => Self::Json(e),
            other => Self::Format(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayahead_types::DayaheadError;

    #[test]
    fn test_format_error_conversion() {
        let err: DayaheadError = FormatError::Parquet("bad schema".to_string()).into();
        assert!(matches!(err, DayaheadError::Format(msg) if msg.contains("bad schema")));

        let io = std::io::Error::other("disk full");
        let err: DayaheadError = FormatError::Io(io).into();
        assert!(matches!(err, DayaheadError::Io(_)));
    }
}
