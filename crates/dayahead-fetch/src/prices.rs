//! Fetch-and-decode pipeline for day-ahead prices.

use dayahead_types::{DayaheadError, PriceCurve, QueryWindow, Resolution, WindowBound};

use crate::url::{BASE_URL, day_ahead_url, redact};
use crate::{ClientConfig, HttpTransport, Transport, decode};

/// Parameters of a day-ahead price query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAheadQuery {
    /// EIC code of the bidding zone.
    pub area_code: String,
    /// Start of the window; now when absent.
    pub start: Option<WindowBound>,
    /// End of the window; one day after start when absent.
    pub end: Option<WindowBound>,
    /// Resolution of the Periods to keep.
    pub resolution: Resolution,
}

impl DayAheadQuery {
    /// Creates a query for the next day of hourly prices in an area.
    #[must_use]
    pub fn new(area_code: impl Into<String>) -> Self {
        Self {
            area_code: area_code.into(),
            start: None,
            end: None,
            resolution: Resolution::default(),
        }
    }

    /// Sets the window start.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<WindowBound>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the window end.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<WindowBound>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Sets the resolution.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Resolves the query window against the current time.
    #[must_use]
    pub fn window(&self) -> QueryWindow {
        QueryWindow::normalize(self.start, self.end)
    }
}

/// Fetches and decodes the day-ahead prices of one area.
///
/// The returned curve covers the whole delivery days the API answers with, which
/// may extend past the requested window on either side.
///
/// # Errors
///
/// Returns [`DayaheadError::Transport`] if the request fails, or a document error
/// if the response cannot be decoded.
#[tracing::instrument(
    skip(transport, api_key),
    fields(area = %query.area_code, resolution = %query.resolution)
)]
pub async fn fetch_day_ahead_prices<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    api_key: &str,
    query: &DayAheadQuery,
) -> Result<PriceCurve, DayaheadError> {
    let window = query.window();
    if window.is_inverted() {
        tracing::warn!(%window, "query window end does not lie after its start");
    }

    let url = day_ahead_url(base_url, api_key, &query.area_code, &window);
    tracing::debug!(url = %redact(&url), "fetching day-ahead prices");

    let body = transport.fetch(&url).await?;
    let curve = decode(&body, query.resolution)?;

    tracing::info!(%window, points = curve.len(), "decoded day-ahead prices");
    Ok(curve)
}

/// Day-ahead price client bundling a transport, API key and endpoint.
#[derive(Clone)]
pub struct DayAheadClient<T = HttpTransport> {
    transport: T,
    api_key: String,
    base_url: String,
}

impl DayAheadClient<HttpTransport> {
    /// Creates a client using the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Creates a client using an HTTP transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::with_transport(HttpTransport::new(config)?, api_key))
    }
}

impl<T: Transport> DayAheadClient<T> {
    /// Creates a client over any transport.
    #[must_use]
    pub fn with_transport(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and decodes the day-ahead prices for a query.
    ///
    /// # Errors
    ///
    /// See [`fetch_day_ahead_prices`].
    pub async fn prices(&self, query: &DayAheadQuery) -> Result<PriceCurve, DayaheadError> {
        fetch_day_ahead_prices(&self.transport, &self.base_url, &self.api_key, query).await
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DayAheadClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayAheadClient")
            .field("transport", &self.transport)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}
