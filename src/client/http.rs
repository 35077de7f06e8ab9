use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::{ConsoleConfig, Endpoints};
use crate::status::StatusSnapshot;

use super::command::{Ack, Command, CommandReply};
use super::error::TransportError;
use super::SupervisorApi;

/// JSON-over-HTTP client for the supervisor facade.
#[derive(Clone)]
pub struct HttpSupervisorClient {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl HttpSupervisorClient {
    pub fn new(console: &ConsoleConfig, endpoints: &Endpoints) -> Result<Self, TransportError> {
        Url::parse(&console.base_url).map_err(|_| TransportError::InvalidUrl {
            url: console.base_url.clone(),
        })?;

        let client = Client::builder()
            .connect_timeout(console.connect_timeout())
            .timeout(console.request_timeout())
            .build()
            .map_err(TransportError::Build)?;

        Ok(Self {
            client,
            base_url: console.base_url.trim_end_matches('/').to_string(),
            endpoints: endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SupervisorApi for HttpSupervisorClient {
    async fn status(&self) -> Result<StatusSnapshot, TransportError> {
        let path = self.endpoints.status.as_str();
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        StatusSnapshot::from_json(&body).map_err(|source| TransportError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn send(&self, command: Command) -> Result<CommandReply, TransportError> {
        let path = self.endpoints.path_for(command);
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        // Launch endpoints may answer with an empty body; that is still an ack.
        let ack = serde_json::from_slice::<Ack>(&body).ok();
        tracing::debug!(command = command.label(), status, "Supervisor replied");

        Ok(CommandReply { status, ack })
    }
}
