//! Remote collaborators for the waymark itinerary planner.
//!
//! Responsibilities:
//! - Implement the `waymark-core` collaborator traits over HTTP.
//! - Decode upstream JSON into core types.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `waymark-core`).
//! - Never surface credentials in errors or logs.
//!
//! Invariants:
//! - Thread-safe; providers can be shared across request handlers.
//! - No global mutable state; credentials are passed at construction.

pub mod google;

pub use google::{
    ClientBuildError, DEFAULT_USER_AGENT, GoogleMapsConfig, HttpDistanceMatrixProvider,
    HttpGeocoder,
};
