//! Error types shared across the core modules.

use std::fmt;

use thiserror::Error;

/// Which fixed endpoint of a route an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The first stop of the route.
    Start,
    /// The last stop of the route.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Malformed or insufficient optimizer input.
///
/// Raised before any ordering is evaluated; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The matrix covers fewer than two points.
    #[error("cost matrix must cover at least two points, got {size}")]
    TooFewPoints {
        /// Number of rows supplied.
        size: usize,
    },
    /// A row does not have one entry per point.
    #[error("cost matrix row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Number of entries every row must have.
        expected: usize,
        /// Number of entries the row actually has.
        found: usize,
    },
    /// An endpoint index does not address a matrix row.
    #[error("{endpoint} index {index} is out of range for {size} points")]
    EndpointOutOfRange {
        /// The offending endpoint.
        endpoint: Endpoint,
        /// The supplied index.
        index: usize,
        /// Number of points in the matrix.
        size: usize,
    },
    /// Start and end refer to the same point.
    #[error("start and end must be distinct points, both are {index}")]
    IdenticalEndpoints {
        /// The shared index.
        index: usize,
    },
}

/// Failure talking to a remote collaborator.
///
/// URLs carried here never include credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection dropped.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Underlying error description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was contacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Endpoint that was contacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

/// Render an upstream status with its optional detail message.
pub(crate) fn describe_status(status: &str, message: Option<&str>) -> String {
    match message {
        Some(detail) if !detail.is_empty() => format!("{status} ({detail})"),
        _ => status.to_owned(),
    }
}
