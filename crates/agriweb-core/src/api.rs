//! Transport seam between the controller and the records API

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::models::ApiErrorBody;

/// HTTP methods the controller issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request against the records API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/api/`
    pub path: String,
    /// JSON body for POST and PUT
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, path: path.into(), body: Some(body) }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Put, path: path.into(), body: Some(body) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: None }
    }
}

/// A completed exchange: status code plus raw body text
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> CoreResult<T> {
        serde_json::from_str(&self.body).map_err(|e| CoreError::InvalidResponse {
            message: e.to_string(),
        })
    }

    /// Structured error body, if the server sent one
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_str(&self.body).ok()
    }

    /// The `message` of the error body, if present
    pub fn error_message(&self) -> Option<String> {
        self.error_body().and_then(|body| body.message)
    }
}

/// Sends requests to the records API
///
/// Only transport failures are errors here; any HTTP status, success or
/// not, comes back as an `ApiResponse` for the caller to interpret.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn send(&self, request: ApiRequest) -> CoreResult<ApiResponse>;
}
