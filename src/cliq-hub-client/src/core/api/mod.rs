// src/core/api/mod.rs
//! HTTP adapter seam between the stores and the hub API.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::ClientError;

pub mod endpoints;
pub mod reqwest_client;

pub use endpoints::Endpoints;
pub use reqwest_client::ReqwestClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    /// Sent as `Authorization: Bearer {token}` when present.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
            bearer: None,
        }
    }

    pub fn post<T: Serialize + ?Sized>(url: impl Into<String>, body: &T) -> Result<Self, ClientError> {
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(serde_json::to_value(body)?),
            bearer: None,
        })
    }

    /// Attaches a bearer token. An empty token leaves the request anonymous.
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = (!token.is_empty()).then(|| token.to_string());
        self
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
    /// Resolves to the decoded JSON body of a 2xx answer. Non-2xx answers
    /// and transport failures come back as errors. An empty 2xx body is
    /// `Value::Null`.
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// Pulls the human readable message out of a hub error body, which is
/// either `{"error": "..."}` or `{"code": "...", "message": "..."}`.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
}
