//! Core domain types for the waymark itinerary planner.
//!
//! The heart of the crate is [`optimize`], an exact solver for the
//! fixed-endpoint travelling salesman problem over a [`CostMatrix`]. Around
//! it sit the collaborator boundaries ([`Geocoder`],
//! [`DistanceMatrixProvider`]), the [`MapsLinkBuilder`] and the
//! [`ItineraryPlanner`] pipeline that ties them together.
//!
//! Nothing in this crate performs I/O; HTTP adapters live in `waymark-data`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod error;
pub mod geocode;
pub mod link;
mod matrix;
pub mod optimizer;
pub mod planner;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{DistanceMatrix, DistanceMatrixError, DistanceMatrixProvider};
pub use error::{Endpoint, InvalidInput, TransportError};
pub use geocode::{Geocoder, GeocodingError, format_lat_lng};
pub use link::{LinkError, MapsLinkBuilder};
pub use matrix::CostMatrix;
pub use optimizer::{
    BestRoute, ExhaustiveOptimizer, Permutations, RouteOptimizer, optimize, optimize_rows,
    route_cost,
};
pub use planner::{Itinerary, ItineraryPlanner, PlanError, Planner, PlannerConfig};
