//! Transport abstraction for backend calls.
//!
//! Services never talk to `reqwest` directly; they hand an [`ApiRequest`]
//! to a [`Transport`] and decode whatever raw response comes back. The
//! production backend is [`HttpTransport`].

pub mod http;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpTransport;

/// An authenticated `GET` against a backend path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Endpoint path, e.g. `/api/chats`
    pub path: String,
    /// Query pairs in send order; absent parameters are simply not present
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Look up the first value for a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for backend transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` with `Authorization: Bearer <token>`.
    async fn get(&self, request: &ApiRequest, token: &str) -> Result<RawResponse>;
}
