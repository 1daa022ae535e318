//! Facade crate for the waymark itinerary planner.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the Google Maps adapters that back them.

#![forbid(unsafe_code)]

pub use waymark_core::{
    BestRoute, CostMatrix, DistanceMatrix, DistanceMatrixError, DistanceMatrixProvider,
    ExhaustiveOptimizer, Geocoder, GeocodingError, InvalidInput, Itinerary, ItineraryPlanner,
    LinkError, MapsLinkBuilder, PlanError, Planner, PlannerConfig, RouteOptimizer,
    TransportError, optimize,
};

#[cfg(feature = "test-support")]
pub use waymark_core::test_support;

#[cfg(feature = "http")]
pub use waymark_data::{GoogleMapsConfig, HttpDistanceMatrixProvider, HttpGeocoder};
