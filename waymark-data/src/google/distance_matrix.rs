//! Distance Matrix API adapter.
//!
//! See: <https://developers.google.com/maps/documentation/distance-matrix/distance-matrix>

use geo::Coord;
use serde::Deserialize;
use waymark_core::distance::ensure_dimensions;
use waymark_core::{DistanceMatrix, DistanceMatrixError, DistanceMatrixProvider, format_lat_lng};

use super::client::BlockingClient;
use super::{ClientBuildError, GoogleMapsConfig};

/// Distance Matrix API response.
///
/// `rows[i].elements[j]` describes travel from the i-th origin to the j-th
/// destination.
#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    /// Top-level status, `"OK"` on success.
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    elements: Vec<Element>,
}

/// One origin/destination pair. `distance` is absent unless `status` is
/// `"OK"`.
#[derive(Debug, Deserialize)]
struct Element {
    status: String,
    #[serde(default)]
    distance: Option<Distance>,
}

#[derive(Debug, Deserialize)]
struct Distance {
    /// Metres.
    value: u64,
}

/// [`DistanceMatrixProvider`] backed by the Google Distance Matrix API.
///
/// Every coordinate is sent as both an origin and a destination, so one
/// request prices all pairs. The adapter owns a Tokio runtime and must
/// therefore be dropped outside asynchronous code.
#[derive(Debug)]
pub struct HttpDistanceMatrixProvider {
    client: BlockingClient,
    config: GoogleMapsConfig,
}

impl HttpDistanceMatrixProvider {
    /// Create a provider for the public endpoint with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(GoogleMapsConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
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

/// Join coordinates into the `lat,lng|lat,lng` list the API expects.
fn waypoint_list(coords: &[Coord<f64>]) -> String {
    coords
        .iter()
        .map(|&coord| format_lat_lng(coord))
        .collect::<Vec<_>>()
        .join("|")
}

impl DistanceMatrixProvider for HttpDistanceMatrixProvider {
    fn distance_matrix(
        &self,
        coords: &[Coord<f64>],
    ) -> Result<DistanceMatrix, DistanceMatrixError> {
        if coords.is_empty() {
            return Err(DistanceMatrixError::EmptyInput);
        }
        let points = waypoint_list(coords);
        log::debug!("requesting a {0}x{0} distance matrix", coords.len());
        let response: DistanceMatrixResponse = self.client.get_json(
            &self.config.distance_matrix_url,
            &[
                ("origins", points.as_str()),
                ("destinations", points.as_str()),
                ("key", self.config.api_key.as_str()),
            ],
        )?;
        convert_response(response, coords.len())
    }
}

fn convert_response(
    response: DistanceMatrixResponse,
    expected: usize,
) -> Result<DistanceMatrix, DistanceMatrixError> {
    if response.status != "OK" {
        return Err(DistanceMatrixError::Status {
            status: response.status,
            message: response.error_message,
        });
    }

    let matrix = response
        .rows
        .into_iter()
        .enumerate()
        .map(|(origin, row)| {
            row.elements
                .into_iter()
                .enumerate()
                .map(|(destination, element)| match element.distance {
                    Some(distance) if element.status == "OK" => Ok(distance.value),
                    _ => Err(DistanceMatrixError::ElementStatus {
                        origin,
                        destination,
                        status: element.status,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<DistanceMatrix, _>>()?;

    ensure_dimensions(&matrix, expected)?;
    Ok(matrix)
}
