//! Blocking wrapper around an asynchronous `reqwest` client.

use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use waymark_core::TransportError;

use super::GoogleMapsConfig;

/// Error type for adapter construction failures.
#[derive(Debug)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// HTTP client plus the runtime used to drive it from synchronous code.
///
/// When called from outside any Tokio runtime, or from a `current_thread`
/// runtime, requests run on the owned runtime. Inside a multi-threaded
/// runtime the caller's handle is used with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
    timeout_secs: u64,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(config: &GoogleMapsConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// `GET endpoint?query` and decode the JSON body.
    ///
    /// `endpoint` is reported in errors; `query` is not, as it carries the
    /// API key.
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        self.block_on(self.fetch_json(endpoint, query))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, endpoint))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, endpoint))?;

        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::Parse {
                message: err.without_url().to_string(),
            })
    }

    /// Convert a reqwest error, dropping the request URL and its query.
    fn convert_reqwest_error(&self, error: reqwest::Error, endpoint: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: endpoint.to_owned(),
                timeout_secs: self.timeout_secs,
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        match status {
            Some(status) => TransportError::Http {
                url: endpoint.to_owned(),
                status: status.as_u16(),
                message,
            },
            None => TransportError::Network {
                url: endpoint.to_owned(),
                message,
            },
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}
