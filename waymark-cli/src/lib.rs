//! Command-line interface for the waymark itinerary planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod optimize;
mod plan;
mod serve;

pub use error::CliError;

use optimize::OptimizeArgs;
use plan::PlanArgs;
use serve::ServeArgs;

const ARG_API_KEY: &str = "api-key";
const ARG_REQUEST: &str = "request";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_MAX_LOCATIONS: &str = "max-locations";
const ARG_MATRIX: &str = "matrix";
const ARG_START: &str = "start";
const ARG_END: &str = "end";
const ARG_BIND: &str = "bind";
const ARG_STATIC_DIR: &str = "static-dir";
const ARG_PLAN_TIMEOUT_SECS: &str = "plan-timeout-secs";
const ENV_PLAN_API_KEY: &str = "WAYMARK_CMDS_PLAN_API_KEY";
const ENV_SERVE_API_KEY: &str = "WAYMARK_CMDS_SERVE_API_KEY";
const ENV_OPTIMIZE_MATRIX: &str = "WAYMARK_CMDS_OPTIMIZE_MATRIX_PATH";

/// Run the waymark CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Optimize(args) => optimize::run_optimize(args),
        Command::Serve(args) => serve::run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Order a trip through named places by shortest total distance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode locations, fetch distances and print the best itinerary.
    Plan(PlanArgs),
    /// Order the points of a distance matrix stored on disk.
    Optimize(OptimizeArgs),
    /// Serve the planner over HTTP.
    Serve(ServeArgs),
}

#[cfg(test)]
mod tests;
