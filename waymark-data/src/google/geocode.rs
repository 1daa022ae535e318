//! Geocoding API adapter.
//!
//! See: <https://developers.google.com/maps/documentation/geocoding/requests-geocoding>

use geo::Coord;
use serde::Deserialize;
use waymark_core::{Geocoder, GeocodingError};

use super::client::BlockingClient;
use super::{ClientBuildError, GoogleMapsConfig};

/// Geocoding API response.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    /// `"OK"` on success, otherwise e.g. `"ZERO_RESULTS"` or
    /// `"REQUEST_DENIED"`.
    status: String,
    /// Explanation accompanying a non-OK status.
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// [`Geocoder`] backed by the Google Geocoding API.
///
/// The first candidate returned for a query wins. The adapter owns a Tokio
/// runtime and must therefore be dropped outside asynchronous code.
#[derive(Debug)]
pub struct HttpGeocoder {
    client: BlockingClient,
    config: GoogleMapsConfig,
}

impl HttpGeocoder {
    /// Create a geocoder for the public endpoint with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(GoogleMapsConfig::new(api_key))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: GoogleMapsConfig) -> Result<Self, ClientBuildError> {
        Ok(Self {
            client: BlockingClient::new(&config)?,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GoogleMapsConfig {
        &self.config
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodingError> {
        if query.trim().is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }
        log::debug!("geocoding {query:?}");
        let response: GeocodeResponse = self.client.get_json(
            &self.config.geocode_url,
            &[("address", query), ("key", self.config.api_key.as_str())],
        )?;
        convert_response(query, response)
    }
}

fn convert_response(query: &str, response: GeocodeResponse) -> Result<Coord<f64>, GeocodingError> {
    if response.status != "OK" {
        return Err(GeocodingError::Status {
            status: response.status,
            message: response.error_message,
        });
    }
    response
        .results
        .into_iter()
        .next()
        .map(|result| Coord {
            x: result.geometry.location.lng,
            y: result.geometry.location.lat,
        })
        .ok_or_else(|| GeocodingError::NoResults {
            query: query.to_owned(),
        })
}
