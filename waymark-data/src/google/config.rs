use std::time::Duration;

/// Default Geocoding API endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default Distance Matrix API endpoint.
pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default user agent for Google Maps requests.
pub const DEFAULT_USER_AGENT: &str = "waymark/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by the Google Maps adapters.
///
/// The API key is redacted from the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct GoogleMapsConfig {
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Geocoding endpoint.
    pub geocode_url: String,
    /// Distance Matrix endpoint.
    pub distance_matrix_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field("api_key", &"<redacted>")
            .field("geocode_url", &self.geocode_url)
            .field("distance_matrix_url", &self.distance_matrix_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GoogleMapsConfig {
    /// Create a configuration for the public endpoints with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
            distance_matrix_url: DEFAULT_DISTANCE_MATRIX_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point geocoding at a different endpoint, e.g. a local mock.
    #[must_use]
    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = url.into();
        self
    }

    /// Point distance lookups at a different endpoint.
    #[must_use]
    pub fn with_distance_matrix_url(mut self, url: impl Into<String>) -> Self {
        self.distance_matrix_url = url.into();
        self
    }
}
