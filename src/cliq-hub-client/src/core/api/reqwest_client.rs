// src/core/api/reqwest_client.rs
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::core::api::{error_message, ApiRequest, HttpClient, HttpMethod};
use crate::debug_log;
use crate::error::{ClientError, ConfigError};

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    #[instrument(name = "hub_http_send", skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = request.url.clone();
        let transport = |e: reqwest::Error| ClientError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        if let Some(header) = request.authorization_header() {
            let value = HeaderValue::from_str(&header)
                .map_err(|e| ClientError::Decode(format!("invalid auth header: {e}")))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        debug_log!("{} {} -> {}", request.method, request.url, status.as_u16());

        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                message: error_message(&text).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                }),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
