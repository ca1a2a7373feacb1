//! ENTSO-E API URL construction.

use chrono::{DateTime, Utc};
use dayahead_types::QueryWindow;

/// Base URL of the ENTSO-E transparency platform REST API.
pub const BASE_URL: &str = "https://web-api.tp.entsoe.eu/api";

/// Document type of day-ahead prices (12.1.D).
pub const DAY_AHEAD_DOCUMENT_TYPE: &str = "A44";

/// Formats an instant as a `periodStart`/`periodEnd` query value.
///
/// Minutes are always written as `00`: the API answers HTTP 400 for any other value.
///
/// # Example
///
/// ```
/// use dayahead_fetch::url::period_param;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 45, 0).unwrap();
/// assert_eq!(period_param(ts), "202401151200");
/// ```
#[must_use]
pub fn period_param(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%d%H00").to_string()
}

/// Builds the day-ahead price query URL for an area and window.
///
/// The area code is used for both `in_Domain` and `out_Domain`.
#[must_use]
pub fn day_ahead_url(base: &str, api_key: &str, area_code: &str, window: &QueryWindow) -> String {
    format!(
        "{}?securityToken={}&documentType={}&in_Domain={}&out_Domain={}&periodStart={}&periodEnd={}",
        base,
        api_key,
        DAY_AHEAD_DOCUMENT_TYPE,
        area_code,
        area_code,
        period_param(window.start),
        period_param(window.end)
    )
}

/// Masks the `securityToken` value of a query URL for logging.
#[must_use]
pub fn redact(url: &str) -> String {
    const KEY: &str = "securityToken=";
    let Some(at) = url.find(KEY) else {
        return url.to_string();
    };
    let value_start = at + KEY.len();
    let value_end = url[value_start..]
        .find('&')
        .map_or(url.len(), |offset| value_start + offset);
    format!("{}***{}", &url[..value_start], &url[value_end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> QueryWindow {
        QueryWindow::new(
            Utc.with_ymd_and_hms(2015, 12, 31, 23, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2016, 12, 31, 23, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_period_param_forces_zero_minutes() {
        let ts = Utc.with_ymd_and_hms(2015, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(period_param(ts), "201512312300");
    }

    #[test]
    fn test_day_ahead_url() {
        let url = day_ahead_url(BASE_URL, "token", "10YCZ-CEPS-----N", &window());
        assert_eq!(
            url,
            "https://web-api.tp.entsoe.eu/api?securityToken=token&documentType=A44\
             &in_Domain=10YCZ-CEPS-----N&out_Domain=10YCZ-CEPS-----N\
             &periodStart=201512312300&periodEnd=201612312300"
        );
    }

    #[test]
    fn test_redact() {
        let url = day_ahead_url(BASE_URL, "secret-key", "10YCZ-CEPS-----N", &window());
        let redacted = redact(&url);
        assert!(!redacted.contains("secret-key"));
        assert!(redacted.contains("securityToken=***&documentType=A44"));
        assert_eq!(redact("https://example.com/api"), "https://example.com/api");
    }
}
