//! Deterministic collaborator doubles for unit, behaviour and doc tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;

use crate::{DistanceMatrix, DistanceMatrixError, DistanceMatrixProvider, Geocoder, GeocodingError};

/// [`Geocoder`] backed by a fixed label-to-coordinate table.
///
/// Unknown labels fail with a `ZERO_RESULTS` status, mirroring a real
/// geocoding service. Every call is counted so tests can assert how often
/// the service would have been hit.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    known: HashMap<String, Coord<f64>>,
    lookups: AtomicUsize,
}

impl StubGeocoder {
    /// Create a geocoder that knows exactly `locations`.
    pub fn with_locations<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        Self {
            known: locations
                .into_iter()
                .map(|(label, coord)| (label.into(), coord))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of `geocode` calls made so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodingError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if query.trim().is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }
        self.known
            .get(query)
            .copied()
            .ok_or_else(|| GeocodingError::Status {
                status: "ZERO_RESULTS".to_owned(),
                message: None,
            })
    }
}

/// [`DistanceMatrixProvider`] returning a pre-configured response.
#[derive(Debug, Clone)]
pub struct StubDistanceMatrixProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Matrix(DistanceMatrix),
    Error(DistanceMatrixError),
}

impl StubDistanceMatrixProvider {
    /// Return `matrix` for any non-empty input.
    #[must_use]
    pub const fn with_matrix(matrix: DistanceMatrix) -> Self {
        Self {
            response: StubResponse::Matrix(matrix),
        }
    }

    /// Return `error` for any non-empty input.
    #[must_use]
    pub const fn with_error(error: DistanceMatrixError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Return a `size x size` matrix with zero on the diagonal and one metre
    /// everywhere else.
    #[must_use]
    pub fn with_unit_matrix(size: usize) -> Self {
        let matrix = (0..size)
            .map(|i| (0..size).map(|j| u64::from(i != j)).collect())
            .collect();
        Self::with_matrix(matrix)
    }
}

impl DistanceMatrixProvider for StubDistanceMatrixProvider {
    fn distance_matrix(
        &self,
        coords: &[Coord<f64>],
    ) -> Result<DistanceMatrix, DistanceMatrixError> {
        if coords.is_empty() {
            return Err(DistanceMatrixError::EmptyInput);
        }
        match &self.response {
            StubResponse::Matrix(matrix) => Ok(matrix.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn geocoder_counts_every_lookup() {
        let geocoder = StubGeocoder::with_locations([("Rome", Coord { x: 12.5, y: 41.9 })]);
        assert_eq!(
            geocoder.geocode("Rome").expect("known label"),
            Coord { x: 12.5, y: 41.9 }
        );
        assert!(geocoder.geocode("Atlantis").is_err());
        assert_eq!(geocoder.geocode(""), Err(GeocodingError::EmptyQuery));
        assert_eq!(geocoder.lookups(), 3);
    }

    #[rstest]
    fn unit_matrix_has_zero_diagonal() {
        let provider = StubDistanceMatrixProvider::with_unit_matrix(3);
        let matrix = provider
            .distance_matrix(&[Coord { x: 0.0, y: 0.0 }])
            .expect("stub ignores coordinate count");
        assert_eq!(matrix, vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);
    }
}
