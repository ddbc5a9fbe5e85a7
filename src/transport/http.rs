// src/transport/http.rs

//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;
use crate::transport::{ApiRequest, RawResponse, Transport};
use crate::utils::endpoint_url;
use crate::utils::http::create_async_client;

/// Transport that talks to the real backend over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest, token: &str) -> Result<RawResponse> {
        let url = endpoint_url(&self.base_url, &request.path, &request.query);
        log::debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        log::debug!("{} {} ({} bytes)", status, request.path, body.len());
        Ok(RawResponse { status, body })
    }
}
