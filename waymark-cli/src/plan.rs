//! Plan command implementation for the waymark CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{Itinerary, ItineraryPlanner, Planner, PlannerConfig};
use waymark_data::{GoogleMapsConfig, HttpDistanceMatrixProvider, HttpGeocoder};

use crate::fs::{read_json, write_json};
use crate::{
    ARG_API_KEY, ARG_MAX_LOCATIONS, ARG_REQUEST, ARG_TIMEOUT_SECS, CliError, ENV_PLAN_API_KEY,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode each location, fetch the pairwise driving \
                 distances and print the ordering that visits every stop \
                 with the least total distance. The first location is the \
                 start and the last is the destination.",
    about = "Plan the shortest trip through a list of locations"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct PlanArgs {
    /// Locations to visit, first and last fixed.
    #[arg(value_name = "location")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) locations: Vec<String>,
    /// JSON file shaped like `{"locations": [...]}`.
    #[arg(long = ARG_REQUEST, value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Google Maps Platform API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Timeout for each upstream HTTP request.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Largest number of locations accepted.
    #[arg(long = ARG_MAX_LOCATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_locations: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where the locations to plan come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LocationSource {
    /// Passed on the command line.
    Inline(Vec<String>),
    /// Read from a JSON request file.
    File(Utf8PathBuf),
}

/// Collaborator settings shared by `plan` and `serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannerSettings {
    /// Google Maps endpoints, credentials and timeouts.
    pub(crate) google: GoogleMapsConfig,
    /// Planner limits.
    pub(crate) planner: PlannerConfig,
}

impl PlannerSettings {
    pub(crate) fn resolve(
        api_key: Option<String>,
        timeout_secs: Option<u64>,
        max_locations: Option<usize>,
        env: &'static str,
    ) -> Result<Self, CliError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_API_KEY,
                env,
            })?;
        let mut google = GoogleMapsConfig::new(api_key);
        if let Some(secs) = timeout_secs {
            google = google.with_timeout(Duration::from_secs(secs));
        }
        let planner = max_locations.map_or_else(PlannerConfig::default, |max| {
            PlannerConfig::default().with_max_locations(max)
        });
        Ok(Self { google, planner })
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Input locations.
    pub(crate) source: LocationSource,
    /// Collaborator settings.
    pub(crate) settings: PlannerSettings,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let source = match (args.request_path, args.locations.is_empty()) {
            (Some(_), false) => {
                return Err(CliError::ConflictingLocations {
                    request: ARG_REQUEST,
                });
            }
            (Some(path), true) => LocationSource::File(path),
            (None, _) => LocationSource::Inline(args.locations),
        };
        let settings = PlannerSettings::resolve(
            args.api_key,
            args.timeout_secs,
            args.max_locations,
            ENV_PLAN_API_KEY,
        )?;
        Ok(Self { source, settings })
    }
}

/// Body of a plan request, on disk or over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct PlanRequest {
    /// Locations to visit; first and last are fixed.
    #[serde(default)]
    pub(crate) locations: Vec<String>,
}

/// Output of a successful plan.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct PlanResponse {
    /// Location labels in visiting order.
    pub(crate) best_path: Vec<String>,
    /// Total distance in kilometres.
    pub(crate) minimum_distance_km: f64,
    /// Google Maps directions link for the ordering.
    pub(crate) google_maps_url: String,
}

impl From<Itinerary> for PlanResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            minimum_distance_km: itinerary.total_distance_km(),
            best_path: itinerary.stops,
            google_maps_url: itinerary.maps_url,
        }
    }
}

/// Builds the planner for a plan or serve invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Box<dyn Planner>, CliError>;
}

/// Wires the Google Maps HTTP adapters into an [`ItineraryPlanner`].
pub(crate) struct GooglePlannerBuilder;

impl PlannerBuilder for GooglePlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Box<dyn Planner>, CliError> {
        let geocoder = HttpGeocoder::with_config(settings.google.clone())?;
        let distances = HttpDistanceMatrixProvider::with_config(settings.google.clone())?;
        Ok(Box::new(
            ItineraryPlanner::new(geocoder, distances).with_config(settings.planner.clone()),
        ))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &GooglePlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_plan(&config, builder)?;
    write_json(writer, &response)
}

fn execute_plan(config: &PlanConfig, builder: &dyn PlannerBuilder) -> Result<PlanResponse, CliError> {
    let locations = match &config.source {
        LocationSource::Inline(locations) => locations.clone(),
        LocationSource::File(path) => load_plan_request(path)?.locations,
    };
    log::debug!("planning a trip through {} locations", locations.len());
    let planner = builder.build(&config.settings)?;
    let itinerary = planner.plan(&locations)?;
    Ok(PlanResponse::from(itinerary))
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &camino::Utf8Path) -> Result<PlanRequest, CliError> {
    read_json(path, ARG_REQUEST)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
