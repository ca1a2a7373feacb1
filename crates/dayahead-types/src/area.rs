//! Bidding zone definitions.

use serde::{Deserialize, Serialize};

/// A bidding zone in the ENTSO-E area coding scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Short alias (e.g., "de-lu", "se3").
    id: String,
    /// EIC code passed as `in_Domain` and `out_Domain` (e.g., "10Y1001A1001A82H").
    code: String,
    /// Human-readable name.
    name: String,
    /// ISO 3166 country code.
    country: String,
    /// IANA time zone the market publishes its delivery days in.
    time_zone: String,
}

impl Area {
    /// Length of an EIC area code.
    pub const CODE_LEN: usize = 16;

    /// Creates a new area.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            country: country.into(),
            time_zone: time_zone.into(),
        }
    }

    /// Returns the short alias.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the EIC code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the country code.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the IANA time zone name.
    #[must_use]
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Returns true if the text has the shape of an EIC area code.
    ///
    /// Only length and character set are checked; the check digit is not.
    #[must_use]
    pub fn looks_like_code(text: &str) -> bool {
        text.len() == Self::CODE_LEN
            && text
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_creation() {
        let area = Area::new("cz", "10YCZ-CEPS-----N", "Czech Republic", "CZ", "Europe/Prague");
        assert_eq!(area.id(), "cz");
        assert_eq!(area.code(), "10YCZ-CEPS-----N");
        assert_eq!(area.time_zone(), "Europe/Prague");
        assert_eq!(area.to_string(), "Czech Republic (10YCZ-CEPS-----N)");
    }

    #[test]
    fn test_looks_like_code() {
        assert!(Area::looks_like_code("10YCZ-CEPS-----N"));
        assert!(Area::looks_like_code("10Y1001A1001A82H"));
        assert!(!Area::looks_like_code("de-lu"));
        assert!(!Area::looks_like_code("10ycz-ceps-----n"));
    }
}
