use thiserror::Error;

use crate::{DistanceMatrixError, GeocodingError, InvalidInput, LinkError};

/// Errors returned by [`crate::Planner::plan`].
///
/// Any collaborator failure aborts the whole request; no partial itinerary
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Fewer than two locations were supplied.
    #[error("please provide at least two locations, got {count}")]
    TooFewLocations {
        /// Number of locations supplied.
        count: usize,
    },
    /// More locations than the configured cap were supplied.
    #[error("at most {max} locations can be planned, got {count}")]
    TooManyLocations {
        /// Number of locations supplied.
        count: usize,
        /// Configured cap.
        max: usize,
    },
    /// A location label was empty or whitespace.
    #[error("location {index} is blank")]
    BlankLocation {
        /// Zero-based position of the blank label.
        index: usize,
    },
    /// A location could not be geocoded.
    #[error("failed to geocode {location:?}: {source}")]
    Geocoding {
        /// The label that failed.
        location: String,
        /// Underlying geocoder error.
        #[source]
        source: GeocodingError,
    },
    /// The distance matrix could not be fetched.
    #[error("failed to fetch distance matrix: {0}")]
    DistanceMatrix(#[from] DistanceMatrixError),
    /// The optimizer rejected the matrix.
    #[error("failed to order stops: {0}")]
    Optimize(#[from] InvalidInput),
    /// The directions link could not be built.
    #[error("failed to build directions link: {0}")]
    Link(#[from] LinkError),
}

impl PlanError {
    /// Whether the failure stems from the caller's input rather than a
    /// collaborator.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewLocations { .. }
                | Self::TooManyLocations { .. }
                | Self::BlankLocation { .. }
        )
    }
}
