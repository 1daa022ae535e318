//! Optimize command implementation for the waymark CLI.
//!
//! Runs the exhaustive optimizer on a matrix file without touching the
//! network, which is handy for checking distances obtained elsewhere.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_core::{BestRoute, CostMatrix, optimize};

use crate::fs::{read_json, write_json};
use crate::{ARG_END, ARG_MATRIX, ARG_START, CliError, ENV_OPTIMIZE_MATRIX};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the cheapest ordering of the points in a square JSON \
                 cost matrix (an array of rows of non-negative integers), \
                 starting and ending at fixed points.",
    about = "Order the points of a cost matrix file"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file holding the cost matrix.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) matrix_path: Option<Utf8PathBuf>,
    /// Index of the start point (defaults to the first).
    #[arg(long = ARG_START, value_name = "index")]
    #[serde(default)]
    pub(crate) start: Option<usize>,
    /// Index of the end point (defaults to the last).
    #[arg(long = ARG_END, value_name = "index")]
    #[serde(default)]
    pub(crate) end: Option<usize>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    pub(crate) matrix_path: Utf8PathBuf,
    pub(crate) start: Option<usize>,
    pub(crate) end: Option<usize>,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let matrix_path = args.matrix_path.ok_or(CliError::MissingArgument {
            field: ARG_MATRIX,
            env: ENV_OPTIMIZE_MATRIX,
        })?;
        Ok(Self {
            matrix_path,
            start: args.start,
            end: args.end,
        })
    }
}

/// Output of the `optimize` command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct OptimizeResponse {
    /// Intermediate points in visiting order.
    pub(crate) order: Vec<usize>,
    /// Full route including both endpoints.
    pub(crate) stops: Vec<usize>,
    /// Total route cost.
    pub(crate) cost: u64,
}

impl OptimizeResponse {
    fn new(best: BestRoute, start: usize, end: usize) -> Self {
        Self {
            stops: best.stops(start, end),
            order: best.order,
            cost: best.cost,
        }
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &mut stdout)
}

pub(crate) fn run_optimize_with(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_optimize(&config)?;
    write_json(writer, &response)
}

fn execute_optimize(config: &OptimizeConfig) -> Result<OptimizeResponse, CliError> {
    let invalid = |source| CliError::InvalidMatrix {
        path: config.matrix_path.clone(),
        source,
    };
    let rows: Vec<Vec<u64>> = read_json(&config.matrix_path, ARG_MATRIX)?;
    let matrix = CostMatrix::new(rows).map_err(invalid)?;
    let start = config.start.unwrap_or(0);
    let end = config
        .end
        .unwrap_or_else(|| matrix.size().saturating_sub(1));
    let best = optimize(&matrix, start, end).map_err(invalid)?;
    Ok(OptimizeResponse::new(best, start, end))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
