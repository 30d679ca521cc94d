//! Vixen play API client
//!
//! Thin wrapper over the show-control server's HTTP play endpoints.
//! Each call is a single attempt bounded by [`REQUEST_TIMEOUT`]; callers get
//! an explicit [`RemoteError`] and decide what a failure means for them.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::Settings;

#[cfg(test)]
pub(crate) mod testing;

pub const STATUS_PATH: &str = "/api/play/status";
pub const SEQUENCES_PATH: &str = "/api/play/getSequences";
pub const PLAY_PATH: &str = "/api/play/playSequence";
pub const STOP_PATH: &str = "/api/play/stopSequence";

/// Upper bound for every request, well under the poll period tolerance
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// `State` value the server reports for a running sequence
const STATE_PLAYING: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{path} timed out")]
    Timeout { path: &'static str },

    #[error("{path} request failed: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned {status}")]
    Status {
        path: &'static str,
        status: StatusCode,
    },

    #[error("{path} returned an unreadable body: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// One entry of the status listing. Only `State` is interpreted; the rest is
/// carried along so it can be printed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl StatusEntry {
    pub fn with_state(state: i64) -> Self {
        Self {
            state: Some(Value::from(state)),
            other: Map::new(),
        }
    }

    /// True when `State` is numerically 1. The server's loose typing also
    /// lets `true` stand in for 1.
    pub fn is_playing(&self) -> bool {
        match &self.state {
            Some(Value::Bool(flag)) => *flag,
            Some(value) => value.as_f64() == Some(STATE_PLAYING),
            None => false,
        }
    }
}

/// The three verbs (plus listing) the controller and CLI need from the server
#[async_trait]
pub trait ShowRemote: Send + Sync {
    async fn status(&self) -> Result<Vec<StatusEntry>, RemoteError>;

    async fn sequences(&self) -> Result<Value, RemoteError>;

    async fn play(&self) -> Result<Value, RemoteError>;

    async fn stop(&self) -> Result<Value, RemoteError>;
}

/// Stateless client bound to one server and one sequence
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    sequence_name: String,
    sequence_file: String,
}

impl RemoteClient {
    pub fn new(settings: &Settings) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RemoteError::Build)?;

        Ok(Self {
            client,
            base_url: settings.remote_host.clone(),
            sequence_name: settings.sequence_name.clone(),
            sequence_file: settings.sequence_file.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, RemoteError> {
        debug!(path, "Vixen GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| send_error(path, e))?;
        decode(path, response).await
    }

    async fn post_sequence(&self, path: &'static str) -> Result<Value, RemoteError> {
        debug!(path, sequence = %self.sequence_name, "Vixen POST");
        let form = [
            ("Name", self.sequence_name.as_str()),
            ("FileName", self.sequence_file.as_str()),
        ];
        let response = self
            .client
            .post(self.url(path))
            .form(&form)
            .send()
            .await
            .map_err(|e| send_error(path, e))?;
        decode(path, response).await
    }
}

#[async_trait]
impl ShowRemote for RemoteClient {
    async fn status(&self) -> Result<Vec<StatusEntry>, RemoteError> {
        self.get_json(STATUS_PATH).await
    }

    async fn sequences(&self) -> Result<Value, RemoteError> {
        self.get_json(SEQUENCES_PATH).await
    }

    async fn play(&self) -> Result<Value, RemoteError> {
        self.post_sequence(PLAY_PATH).await
    }

    async fn stop(&self) -> Result<Value, RemoteError> {
        self.post_sequence(STOP_PATH).await
    }
}

fn send_error(path: &'static str, source: reqwest::Error) -> RemoteError {
    if source.is_timeout() {
        RemoteError::Timeout { path }
    } else {
        RemoteError::Transport { path, source }
    }
}

async fn decode<T: DeserializeOwned>(
    path: &'static str,
    response: reqwest::Response,
) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status { path, status });
    }

    response.json().await.map_err(|source| {
        if source.is_timeout() {
            RemoteError::Timeout { path }
        } else {
            RemoteError::Decode { path, source }
        }
    })
}
