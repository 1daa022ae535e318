//! Google Maps Platform adapters.
//!
//! [`HttpGeocoder`] calls the Geocoding API and
//! [`HttpDistanceMatrixProvider`] calls the Distance Matrix API. Both
//! implement the synchronous `waymark-core` traits by blocking on
//! asynchronous `reqwest` calls, so the planner stays usable outside an
//! async context.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use waymark_core::{ItineraryPlanner, Planner};
//! use waymark_data::google::{GoogleMapsConfig, HttpDistanceMatrixProvider, HttpGeocoder};
//!
//! let config = GoogleMapsConfig::new("my-api-key").with_timeout(Duration::from_secs(10));
//! let planner = ItineraryPlanner::new(
//!     HttpGeocoder::with_config(config.clone())?,
//!     HttpDistanceMatrixProvider::with_config(config)?,
//! );
//! let locations = ["Dublin", "Galway", "Cork"].map(String::from);
//! let itinerary = planner.plan(&locations)?;
//! println!("{}", itinerary.maps_url);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod distance_matrix;
mod geocode;

pub use client::ClientBuildError;
pub use config::{
    DEFAULT_DISTANCE_MATRIX_URL, DEFAULT_GEOCODE_URL, DEFAULT_USER_AGENT, GoogleMapsConfig,
};
pub use distance_matrix::HttpDistanceMatrixProvider;
pub use geocode::HttpGeocoder;
