//! Pairwise travel distances between coordinates.
//!
//! A [`DistanceMatrixProvider`] turns an ordered list of coordinates into a
//! square matrix of distances in metres, in the same order as its input.

use geo::Coord;
use thiserror::Error;

use crate::TransportError;
use crate::error::describe_status;

/// Row-major matrix of distances in metres.
pub type DistanceMatrix = Vec<Vec<u64>>;

/// Errors from [`DistanceMatrixProvider::distance_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceMatrixError {
    /// No coordinates were provided.
    #[error("at least one coordinate is required")]
    EmptyInput,
    /// The service answered with a non-OK status.
    #[error(
        "error fetching distance matrix: {}",
        describe_status(status, message.as_deref())
    )]
    Status {
        /// Upstream status code, e.g. `MAX_ELEMENTS_EXCEEDED`.
        status: String,
        /// Optional upstream explanation.
        message: Option<String>,
    },
    /// The service could not price one origin/destination pair.
    #[error("no distance from point {origin} to point {destination}: {status}")]
    ElementStatus {
        /// Origin index.
        origin: usize,
        /// Destination index.
        destination: usize,
        /// Upstream element status, e.g. `ZERO_RESULTS`.
        status: String,
    },
    /// The matrix shape does not match the input.
    #[error("expected a {expected}x{expected} matrix, got {found} rows")]
    DimensionMismatch {
        /// Number of coordinates requested.
        expected: usize,
        /// Number of rows (or entries in a row) returned.
        found: usize,
    },
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Fetch pairwise distances for a list of coordinates.
///
/// Implementers must return an `n x n` matrix where `n == coords.len()` and
/// `matrix[i][j]` is the distance from `coords[i]` to `coords[j]`. The matrix
/// need not be symmetric.
pub trait DistanceMatrixProvider {
    /// Return the distance matrix for `coords`.
    ///
    /// # Errors
    ///
    /// Implementations must return [`DistanceMatrixError::EmptyInput`] when
    /// `coords` is empty.
    fn distance_matrix(
        &self,
        coords: &[Coord<f64>],
    ) -> Result<DistanceMatrix, DistanceMatrixError>;
}

/// Check that `matrix` is `expected x expected`.
///
/// # Errors
///
/// Returns [`DistanceMatrixError::DimensionMismatch`] on the first row count
/// or row length that differs from `expected`.
pub fn ensure_dimensions(
    matrix: &[Vec<u64>],
    expected: usize,
) -> Result<(), DistanceMatrixError> {
    if matrix.len() != expected {
        return Err(DistanceMatrixError::DimensionMismatch {
            expected,
            found: matrix.len(),
        });
    }
    match matrix.iter().find(|row| row.len() != expected) {
        Some(row) => Err(DistanceMatrixError::DimensionMismatch {
            expected,
            found: row.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::StubDistanceMatrixProvider;

    fn coords(count: usize) -> Vec<Coord<f64>> {
        (0..count)
            .map(|i| Coord {
                x: f64::from(u32::try_from(i).expect("small index")),
                y: 0.0,
            })
            .collect()
    }

    #[rstest]
    fn returns_square_matrix() {
        let provider = StubDistanceMatrixProvider::with_unit_matrix(3);
        let matrix = provider
            .distance_matrix(&coords(3))
            .expect("expected square matrix from stub provider");
        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert!(ensure_dimensions(&matrix, 3).is_ok());
    }

    #[rstest]
    fn errors_on_empty_input() {
        let provider = StubDistanceMatrixProvider::with_unit_matrix(2);
        let err = provider
            .distance_matrix(&[])
            .expect_err("expected EmptyInput for empty slice");
        assert_eq!(err, DistanceMatrixError::EmptyInput);
    }

    #[rstest]
    #[case(vec![vec![0, 1]], 1)]
    #[case(vec![vec![0, 1], vec![1]], 1)]
    #[case(vec![vec![0, 1, 2], vec![1, 0, 2]], 3)]
    fn ensure_dimensions_reports_mismatch(#[case] matrix: DistanceMatrix, #[case] found: usize) {
        let err = ensure_dimensions(&matrix, 2).expect_err("mismatched shape");
        assert_eq!(
            err,
            DistanceMatrixError::DimensionMismatch { expected: 2, found }
        );
    }
}
