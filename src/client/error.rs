use thiserror::Error;

/// Failures at the network boundary with the supervisor.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Invalid supervisor URL '{url}'")]
    InvalidUrl { url: String },

    #[error("Request to '{path}' failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from '{path}'")]
    Status { path: String, status: u16 },

    #[error("Failed to decode response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
