//! Client for the hosted screening endpoint.
//!
//! The endpoint accepts a multipart POST with one photograph per jaw and
//! answers with a [`ScreeningReport`] in JSON. Inference happens server
//! side, so this path needs no local model artifact.
//!
//! ```no_run
//! use dentascan_remote::{RemoteClient, RemoteConfig};
//!
//! let client = RemoteClient::new(RemoteConfig::default())?;
//! let report = client.screen_pair("upper.jpg", "lower.jpg")?;
//! println!("upper jaw: {}", report.upper_jaw.prediction);
//! # Ok::<(), dentascan_remote::RemoteError>(())
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use dentascan_core::classes::ScreeningReport;
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::multipart::Form;
use thiserror::Error;

/// Hosted endpoint serving the same model as the local pipeline.
pub const DEFAULT_ENDPOINT: &str = "https://dalvero-api-dental-ai.hf.space/predict";

/// Generous ceiling: the space cold-starts in tens of seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const UPPER_FIELD: &str = "upper_img";
const LOWER_FIELD: &str = "lower_img";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to screening endpoint failed")]
    Transport(#[from] reqwest::Error),
    #[error("screening endpoint answered {status}")]
    Status { status: StatusCode, body: String },
    #[error("screening endpoint answered with an unparseable body")]
    MalformedResponse { source: serde_json::Error, body: String },
    #[error("could not read photograph {}", path.display())]
    Photo { path: PathBuf, source: std::io::Error },
}

/// Where and how patiently to reach the endpoint.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig { endpoint: DEFAULT_ENDPOINT.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl RemoteConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        RemoteConfig { endpoint: endpoint.into(), ..RemoteConfig::default() }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        RemoteConfig { timeout, ..self }
    }
}

/// Blocking client over the screening endpoint.
#[derive(Debug)]
pub struct RemoteClient {
    config: RemoteConfig,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::blocking::Client::builder().timeout(config.timeout).build()?;
        Ok(RemoteClient { config, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Uploads both photographs and returns the server's paired report.
    ///
    /// The photographs are sent as-is. All resizing and normalization is
    /// the server's business, which keeps this client honest about what
    /// the hosted model actually saw.
    pub fn screen_pair(
        &self,
        upper: impl AsRef<Path>,
        lower: impl AsRef<Path>,
    ) -> Result<ScreeningReport, RemoteError> {
        let form = Form::new()
            .file(UPPER_FIELD, upper.as_ref())
            .map_err(|source| RemoteError::Photo { path: upper.as_ref().to_path_buf(), source })?
            .file(LOWER_FIELD, lower.as_ref())
            .map_err(|source| RemoteError::Photo { path: lower.as_ref().to_path_buf(), source })?;

        debug!("posting screening pair to {}", self.config.endpoint);
        let response = self.http.post(&self.config.endpoint).multipart(form).send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(RemoteError::Status { status, body });
        }
        parse_report(&body)
    }
}

fn parse_report(body: &str) -> Result<ScreeningReport, RemoteError> {
    serde_json::from_str(body)
        .map_err(|source| RemoteError::MalformedResponse { source, body: body.to_string() })
}
