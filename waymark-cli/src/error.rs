//! Error types emitted by the waymark CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::net::SocketAddr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::{InvalidInput, PlanError};
use waymark_data::ClientBuildError;

/// Errors emitted by the waymark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Locations were given both inline and through a request file.
    #[error("pass locations either as arguments or with --{request}, not both")]
    ConflictingLocations {
        /// Flag naming the request file.
        request: &'static str,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Which input was being read.
        field: &'static str,
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not contain the expected JSON.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Which input was being read.
        field: &'static str,
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The matrix file or the requested endpoints are not a valid problem.
    #[error("cannot optimise {path:?}: {source}")]
    InvalidMatrix {
        /// Path of the matrix file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: InvalidInput,
    },
    /// Constructing the HTTP collaborators failed.
    #[error("failed to build Google Maps client: {0}")]
    BuildClient(#[from] ClientBuildError),
    /// Planning the itinerary failed.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// The static asset directory cannot be opened.
    #[error("static directory {path:?} cannot be opened: {source}")]
    StaticDir {
        /// Configured directory.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Building the server runtime failed.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Binding the listening socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
