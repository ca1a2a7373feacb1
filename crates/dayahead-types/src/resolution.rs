//! Price period resolution definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling interval of a price period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Resolution {
    /// Quarter-hour prices.
    #[serde(rename = "15m")]
    Minute15,
    /// Half-hour prices.
    #[serde(rename = "30m")]
    Minute30,
    /// Hourly prices.
    #[default]
    #[serde(rename = "60m")]
    Minute60,
}

impl Resolution {
    /// Returns the interval length in minutes.
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        match self {
            Self::Minute15 => 15,
            Self::Minute30 => 30,
            Self::Minute60 => 60,
        }
    }

    /// Returns the interval as a time delta.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(self.minutes())
    }

    /// Returns the resolution as a short identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Minute60 => "60m",
        }
    }

    /// Returns the ISO 8601 duration used in market documents.
    #[must_use]
    pub const fn as_iso8601(&self) -> &'static str {
        match self {
            Self::Minute15 => "PT15M",
            Self::Minute30 => "PT30M",
            Self::Minute60 => "PT60M",
        }
    }

    /// Parses the `resolution` text of a market document Period.
    ///
    /// Only the exact strings `PT15M`, `PT30M` and `PT60M` are recognized.
    #[must_use]
    pub fn from_iso8601(text: &str) -> Option<Self> {
        match text {
            "PT15M" => Some(Self::Minute15),
            "PT30M" => Some(Self::Minute30),
            "PT60M" => Some(Self::Minute60),
            _ => None,
        }
    }

    /// Returns all supported resolutions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute15, Self::Minute30, Self::Minute60]
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "15m" | "m15" | "15" | "pt15m" | "quarter" => Ok(Self::Minute15),
            "30m" | "m30" | "30" | "pt30m" | "half" => Ok(Self::Minute30),
            "60m" | "m60" | "60" | "pt60m" | "1h" | "h1" | "hour" => Ok(Self::Minute60),
            _ => Err(ResolutionParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid resolution string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionParseError(String);

impl std::fmt::Display for ResolutionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid resolution '{}', expected one of: 15m, 30m, 60m",
            self.0
        )
    }
}

impl std::error::Error for ResolutionParseError {}
