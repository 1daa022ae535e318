//! Resolve free-text place names to coordinates.
//!
//! The [`Geocoder`] trait hides the remote service. Coordinates use
//! [`geo::Coord`] with `x` as longitude and `y` as latitude.

use geo::Coord;
use thiserror::Error;

use crate::TransportError;
use crate::error::describe_status;

/// Errors from [`Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    /// The query was blank.
    #[error("location query must not be blank")]
    EmptyQuery,
    /// The service answered with a non-OK status.
    #[error(
        "error fetching coordinates: {}",
        describe_status(status, message.as_deref())
    )]
    Status {
        /// Upstream status code, e.g. `ZERO_RESULTS`.
        status: String,
        /// Optional upstream explanation.
        message: Option<String>,
    },
    /// The service reported success without any candidate.
    #[error("no coordinates found for {query:?}")]
    NoResults {
        /// The query that produced no match.
        query: String,
    },
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convert a location description into a single coordinate.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use waymark_core::{Geocoder, GeocodingError};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodingError> {
///         if query.trim().is_empty() {
///             return Err(GeocodingError::EmptyQuery);
///         }
///         Ok(Coord { x: 0.0, y: 0.0 })
///     }
/// }
///
/// assert!(Origin.geocode("Null Island").is_ok());
/// assert_eq!(Origin.geocode(" "), Err(GeocodingError::EmptyQuery));
/// ```
pub trait Geocoder {
    /// Return the best-matching coordinate for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] when the query is blank, the service
    /// rejects it, or the request fails.
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodingError>;
}

/// Format a coordinate as the `"lat,lng"` pair distance services expect.
///
/// ```
/// use geo::Coord;
/// use waymark_core::format_lat_lng;
///
/// assert_eq!(format_lat_lng(Coord { x: 2.35, y: 48.85 }), "48.85,2.35");
/// ```
#[must_use]
pub fn format_lat_lng(coord: Coord<f64>) -> String {
    format!("{},{}", coord.y, coord.x)
}
