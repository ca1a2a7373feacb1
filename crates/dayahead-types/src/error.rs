//! Error types for dayahead.

use thiserror::Error;

/// Result type alias for dayahead operations.
pub type Result<T> = std::result::Result<T, DayaheadError>;

/// Errors that can occur while fetching and decoding a price curve.
///
/// Transport failures are kept apart from document failures so automated
/// callers can tell a transient network issue from a permanent format issue.
#[derive(Error, Debug)]
pub enum DayaheadError {
    /// HTTP request failed or the server answered with a non-success status.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status code, if the server answered at all.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// The response body is not a well-formed XML document.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A Period or Point lacks an element it needs.
    #[error("Incomplete record: {0}")]
    IncompleteRecord(String),

    /// A Period declares a resolution other than PT15M, PT30M or PT60M.
    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),

    /// Area alias or code not recognized.
    #[error("Unknown area: {0}")]
    UnknownArea(String),

    /// A start or end instant could not be parsed.
    #[error("Invalid instant '{0}'")]
    InvalidBound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DayaheadError {
    /// Returns true if the failure happened in transport rather than in the document.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let err = DayaheadError::Transport {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        };
        assert!(err.is_transport());
        assert!(!DayaheadError::MalformedDocument("eof".to_string()).is_transport());
    }

    #[test]
    fn test_display() {
        let err = DayaheadError::UnsupportedResolution("P1D".to_string());
        assert_eq!(err.to_string(), "Unsupported resolution: P1D");
    }
}
