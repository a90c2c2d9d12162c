//! HTTP transport for operation documents
//!
//! Posts `{ query, variables }` to the content endpoint and unwraps the
//! standard `{ data, errors }` envelope. No retries are attempted; every
//! failure is reported once to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AdminConfig;
use crate::error::TransportError;
use crate::remote::RemoteExecutor;

#[derive(Debug, Serialize)]
struct OperationRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<OperationError>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    message: String,
}

/// [`RemoteExecutor`] speaking GraphQL over HTTP
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    content_api_url: String,
    identity_url: Option<String>,
    token: Option<String>,
}

impl HttpExecutor {
    pub fn new(content_api_url: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("content-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            content_api_url: content_api_url.to_string(),
            identity_url: None,
            token: None,
        })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, TransportError> {
        let mut executor = Self::new(&config.content_api_url, config.request_timeout_secs)?;
        executor.identity_url = config.identity_url.clone();
        executor.token = config.token.clone();
        Ok(executor)
    }

    /// Send a bearer token with every request
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Check sessions against an identity endpoint instead of assuming local mode
    pub fn with_identity_url(mut self, url: &str) -> Self {
        self.identity_url = Some(url.to_string());
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Unwrap a response envelope into its `data` member
fn unwrap_envelope(response: OperationResponse) -> Result<Value, TransportError> {
    if !response.errors.is_empty() {
        return Err(TransportError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    response
        .data
        .ok_or_else(|| TransportError::Decode("response carried neither data nor errors".to_string()))
}

#[async_trait]
impl RemoteExecutor for HttpExecutor {
    async fn is_authenticated(&self) -> Result<bool, TransportError> {
        let Some(identity_url) = &self.identity_url else {
            // Local mode: the endpoint performs no session checks
            return Ok(true);
        };

        let response = self.authorize(self.client.get(identity_url)).send().await?;
        let status = response.status();
        match status {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            _ => Err(TransportError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        let body = OperationRequest {
            query: document,
            variables,
        };
        log::debug!("Posting operation to {}", self.content_api_url);

        let response = self
            .authorize(self.client.post(&self.content_api_url))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let envelope: OperationResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))?;
        unwrap_envelope(envelope)
    }
}
