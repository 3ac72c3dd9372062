use crate::{
    abstract_trait::sync::UpstreamClientTrait,
    config::UpstreamConfig,
    sync::{Credentials, RawResponse},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::errors::UpstreamError;
use std::time::Duration;
use tracing::{error, info};

const USER_AGENT: &str = concat!("catalog-sync/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    api_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            timeout: config.timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else if err.is_connect() {
            UpstreamError::Connection(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl UpstreamClientTrait for UpstreamClient {
    async fn fetch(&self, credentials: &Credentials) -> Result<RawResponse, UpstreamError> {
        info!(
            "🌐 Fetching products from {} as {}",
            self.api_url, credentials.username
        );

        let response = self
            .http
            .post(&self.api_url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("❌ Upstream request failed: {e}");
                self.classify(e)
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(UpstreamError::Unauthorized),
            StatusCode::FORBIDDEN => return Err(UpstreamError::Forbidden),
            s if !s.is_success() => {
                error!("❌ Upstream answered HTTP {}", s.as_u16());
                return Err(UpstreamError::Status(s.as_u16()));
            }
            _ => {}
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        let value = serde_json::from_str(&body).map_err(|e| {
            error!("❌ Upstream body is not JSON: {e}");
            UpstreamError::Decode(e.to_string())
        })?;

        Ok(RawResponse(value))
    }
}
