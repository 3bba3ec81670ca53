//! A utility module for outbound HTTP requests behind an injectable trait.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response status: {0}")]
    Status(u16),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Minimal HTTP transport used by the OAuth providers. Implementations
/// return the response body as text; a non-2xx status is an error.
#[async_trait::async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait HttpFetcher: Send + Sync {
    /// Performs a GET request with the given headers.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<String, FetchError>;

    /// Performs a POST request with the given body and headers.
    async fn post(&self, url: &str, body: &str, headers: &[(String, String)]) -> Result<String, FetchError>;
}

pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self { client: reqwest::Client::builder().build()? })
    }
}

#[async_trait::async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<String, FetchError> {
        let response = self.client.get(url).headers(header_map(headers)?).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    async fn post(&self, url: &str, body: &str, headers: &[(String, String)]) -> Result<String, FetchError> {
        let response = self
            .client
            .post(url)
            .headers(header_map(headers)?)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| FetchError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader(value.clone()))?;
        map.insert(name, value);
    }

    Ok(map)
}
