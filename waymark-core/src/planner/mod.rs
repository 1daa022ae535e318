//! End-to-end itinerary planning.
//!
//! [`ItineraryPlanner`] wires the collaborators together: every location is
//! geocoded once, the resulting coordinates are priced by a
//! [`DistanceMatrixProvider`], the matrix is ordered by a [`RouteOptimizer`]
//! with the first location as start and the last as end, and the ordered
//! labels are turned into a directions link.

mod error;
mod itinerary;

pub use error::PlanError;
pub use itinerary::Itinerary;

use geo::Coord;

use crate::distance::ensure_dimensions;
use crate::{
    CostMatrix, DistanceMatrixProvider, ExhaustiveOptimizer, Geocoder, MapsLinkBuilder,
    RouteOptimizer,
};

/// Location cap applied when none is configured.
///
/// Ten locations leave eight intermediate stops, or 40 320 orderings.
pub const DEFAULT_MAX_LOCATIONS: usize = 10;

/// Configuration for [`ItineraryPlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Largest number of locations accepted in one request.
    pub max_locations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

impl PlannerConfig {
    /// Set the location cap.
    #[must_use]
    pub const fn with_max_locations(mut self, max_locations: usize) -> Self {
        self.max_locations = max_locations;
        self
    }
}

/// Plan an itinerary through a list of named locations.
///
/// Planners must be `Send + Sync` so a server can share one across requests.
pub trait Planner: Send + Sync {
    /// Order `locations` from the first to the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for invalid input or any collaborator failure.
    fn plan(&self, locations: &[String]) -> Result<Itinerary, PlanError>;
}

/// Default [`Planner`] composed of a geocoder, a distance provider and an
/// optimizer.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use waymark_core::test_support::{StubDistanceMatrixProvider, StubGeocoder};
/// use waymark_core::{ItineraryPlanner, Planner};
///
/// # fn main() -> Result<(), waymark_core::PlanError> {
/// let geocoder = StubGeocoder::with_locations([
///     ("Home", Coord { x: 0.0, y: 0.0 }),
///     ("Shop", Coord { x: 1.0, y: 0.0 }),
///     ("Work", Coord { x: 2.0, y: 0.0 }),
/// ]);
/// let distances = StubDistanceMatrixProvider::with_matrix(vec![
///     vec![0, 1_000, 5_000],
///     vec![1_000, 0, 1_500],
///     vec![5_000, 1_500, 0],
/// ]);
/// let planner = ItineraryPlanner::new(geocoder, distances);
///
/// let locations = ["Home", "Shop", "Work"].map(String::from);
/// let itinerary = planner.plan(&locations)?;
/// assert_eq!(itinerary.stops, locations);
/// assert_eq!(itinerary.total_distance_metres, 2_500);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<G, D, O = ExhaustiveOptimizer> {
    geocoder: G,
    distances: D,
    optimizer: O,
    links: MapsLinkBuilder,
    config: PlannerConfig,
}

impl<G, D> ItineraryPlanner<G, D>
where
    G: Geocoder,
    D: DistanceMatrixProvider,
{
    /// Construct a planner with the exhaustive optimizer and defaults.
    pub fn new(geocoder: G, distances: D) -> Self {
        Self {
            geocoder,
            distances,
            optimizer: ExhaustiveOptimizer,
            links: MapsLinkBuilder::default(),
            config: PlannerConfig::default(),
        }
    }
}

impl<G, D, O> ItineraryPlanner<G, D, O>
where
    G: Geocoder,
    D: DistanceMatrixProvider,
    O: RouteOptimizer,
{
    /// Replace the planner configuration.
    #[must_use]
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the directions link builder.
    #[must_use]
    pub fn with_link_builder(mut self, links: MapsLinkBuilder) -> Self {
        self.links = links;
        self
    }

    /// Swap in a different optimizer.
    pub fn with_optimizer<P: RouteOptimizer>(self, optimizer: P) -> ItineraryPlanner<G, D, P> {
        ItineraryPlanner {
            geocoder: self.geocoder,
            distances: self.distances,
            optimizer,
            links: self.links,
            config: self.config,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn validate(&self, locations: &[String]) -> Result<(), PlanError> {
        let count = locations.len();
        if count < 2 {
            return Err(PlanError::TooFewLocations { count });
        }
        if count > self.config.max_locations {
            return Err(PlanError::TooManyLocations {
                count,
                max: self.config.max_locations,
            });
        }
        if let Some(index) = locations
            .iter()
            .position(|location| location.trim().is_empty())
        {
            return Err(PlanError::BlankLocation { index });
        }
        Ok(())
    }

    fn geocode_all(&self, locations: &[String]) -> Result<Vec<Coord<f64>>, PlanError> {
        locations
            .iter()
            .map(|location| {
                self.geocoder.geocode(location).map_err(|source| {
                    log::warn!("geocoding {location:?} failed: {source}");
                    PlanError::Geocoding {
                        location: location.clone(),
                        source,
                    }
                })
            })
            .collect()
    }

    fn fetch_matrix(&self, coordinates: &[Coord<f64>]) -> Result<CostMatrix, PlanError> {
        let rows = self
            .distances
            .distance_matrix(coordinates)
            .inspect_err(|err| log::warn!("distance matrix request failed: {err}"))?;
        ensure_dimensions(&rows, coordinates.len())?;
        Ok(CostMatrix::new(rows)?)
    }
}

impl<G, D, O> Planner for ItineraryPlanner<G, D, O>
where
    G: Geocoder + Send + Sync,
    D: DistanceMatrixProvider + Send + Sync,
    O: RouteOptimizer,
{
    fn plan(&self, locations: &[String]) -> Result<Itinerary, PlanError> {
        self.validate(locations)?;

        let coordinates = self.geocode_all(locations)?;
        log::debug!("geocoded {} locations", coordinates.len());

        let matrix = self.fetch_matrix(&coordinates)?;
        let start = 0;
        let end = matrix.size() - 1;
        let best = self.optimizer.optimize(&matrix, start, end)?;
        log::debug!("best ordering {:?} costs {} m", best.order, best.cost);

        let stops: Vec<String> = best
            .stops(start, end)
            .into_iter()
            .filter_map(|index| locations.get(index).cloned())
            .collect();
        let maps_url = self.links.build(&stops)?;

        Ok(Itinerary {
            stops,
            total_distance_metres: best.cost,
            maps_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::test_support::{StubDistanceMatrixProvider, StubGeocoder};
    use crate::{DistanceMatrixError, GeocodingError, InvalidInput, TransportError};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[fixture]
    fn geocoder() -> StubGeocoder {
        StubGeocoder::with_locations([
            ("Start", Coord { x: 0.0, y: 0.0 }),
            ("Museum", Coord { x: 1.0, y: 0.0 }),
            ("Park", Coord { x: 2.0, y: 0.0 }),
            ("Finish", Coord { x: 3.0, y: 0.0 }),
        ])
    }

    /// With input order Start, Park, Museum, Finish: visiting Museum before
    /// Park costs 10 km, the reverse 15 km.
    #[fixture]
    fn distances() -> StubDistanceMatrixProvider {
        StubDistanceMatrixProvider::with_matrix(vec![
            vec![0, 4_000, 2_000, 20_000],
            vec![4_000, 0, 3_000, 5_000],
            vec![2_000, 3_000, 0, 8_000],
            vec![20_000, 5_000, 8_000, 0],
        ])
    }

    #[rstest]
    fn orders_intermediate_stops(geocoder: StubGeocoder, distances: StubDistanceMatrixProvider) {
        let planner = ItineraryPlanner::new(geocoder, distances);
        let itinerary = planner
            .plan(&labels(&["Start", "Park", "Museum", "Finish"]))
            .expect("plan succeeds");

        assert_eq!(itinerary.stops, labels(&["Start", "Museum", "Park", "Finish"]));
        assert_eq!(itinerary.total_distance_metres, 10_000);
        assert_eq!(
            itinerary.maps_url,
            "https://www.google.com/maps/dir/?api=1&origin=Start&destination=Finish&waypoints=Museum|Park"
        );
    }

    #[rstest]
    fn geocodes_each_location_once(geocoder: StubGeocoder, distances: StubDistanceMatrixProvider) {
        let planner = ItineraryPlanner::new(geocoder, distances);
        planner
            .plan(&labels(&["Start", "Museum", "Park", "Finish"]))
            .expect("plan succeeds");
        assert_eq!(planner.geocoder.lookups(), 4);
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&["Start"], 1)]
    fn rejects_fewer_than_two_locations(
        geocoder: StubGeocoder,
        distances: StubDistanceMatrixProvider,
        #[case] names: &[&str],
        #[case] count: usize,
    ) {
        let planner = ItineraryPlanner::new(geocoder, distances);
        let err = planner.plan(&labels(names)).expect_err("too few");
        assert_eq!(err, PlanError::TooFewLocations { count });
        assert!(err.is_client_error());
        assert_eq!(planner.geocoder.lookups(), 0);
    }

    #[rstest]
    fn enforces_location_cap(geocoder: StubGeocoder, distances: StubDistanceMatrixProvider) {
        let planner = ItineraryPlanner::new(geocoder, distances)
            .with_config(PlannerConfig::default().with_max_locations(3));
        let err = planner
            .plan(&labels(&["Start", "Museum", "Park", "Finish"]))
            .expect_err("over the cap");
        assert_eq!(err, PlanError::TooManyLocations { count: 4, max: 3 });
    }

    #[rstest]
    fn rejects_blank_location(geocoder: StubGeocoder, distances: StubDistanceMatrixProvider) {
        let planner = ItineraryPlanner::new(geocoder, distances);
        let err = planner
            .plan(&labels(&["Start", "  ", "Finish"]))
            .expect_err("blank label");
        assert_eq!(err, PlanError::BlankLocation { index: 1 });
    }

    #[rstest]
    fn surfaces_geocoding_failure(geocoder: StubGeocoder, distances: StubDistanceMatrixProvider) {
        let planner = ItineraryPlanner::new(geocoder, distances);
        let err = planner
            .plan(&labels(&["Start", "Atlantis", "Finish"]))
            .expect_err("unknown location");
        match err {
            PlanError::Geocoding { location, source } => {
                assert_eq!(location, "Atlantis");
                assert!(matches!(source, GeocodingError::Status { .. }));
            }
            other => panic!("expected Geocoding error, got {other:?}"),
        }
        // Planning stops at the first failure.
        assert_eq!(planner.geocoder.lookups(), 2);
    }

    #[rstest]
    fn surfaces_distance_failure(geocoder: StubGeocoder) {
        let distances =
            StubDistanceMatrixProvider::with_error(DistanceMatrixError::Transport(
                TransportError::Network {
                    url: "https://maps.example.com/distancematrix/json".to_owned(),
                    message: "connection refused".to_owned(),
                },
            ));
        let planner = ItineraryPlanner::new(geocoder, distances);
        let err = planner
            .plan(&labels(&["Start", "Finish"]))
            .expect_err("distance failure");
        assert!(matches!(err, PlanError::DistanceMatrix(_)));
        assert!(!err.is_client_error());
    }

    #[rstest]
    fn rejects_matrix_of_wrong_size(geocoder: StubGeocoder) {
        let planner =
            ItineraryPlanner::new(geocoder, StubDistanceMatrixProvider::with_unit_matrix(2));
        let err = planner
            .plan(&labels(&["Start", "Museum", "Finish"]))
            .expect_err("2x2 matrix for 3 locations");
        assert_eq!(
            err,
            PlanError::DistanceMatrix(DistanceMatrixError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[rstest]
    fn custom_optimizer_errors_are_reported(
        geocoder: StubGeocoder,
        distances: StubDistanceMatrixProvider,
    ) {
        struct Refusing;

        impl RouteOptimizer for Refusing {
            fn optimize(
                &self,
                _matrix: &CostMatrix,
                start: usize,
                _end: usize,
            ) -> Result<crate::BestRoute, InvalidInput> {
                Err(InvalidInput::IdenticalEndpoints { index: start })
            }
        }

        let planner = ItineraryPlanner::new(geocoder, distances).with_optimizer(Refusing);
        let err = planner
            .plan(&labels(&["Start", "Museum", "Park", "Finish"]))
            .expect_err("optimizer refuses");
        assert_eq!(
            err,
            PlanError::Optimize(InvalidInput::IdenticalEndpoints { index: 0 })
        );
    }
}
