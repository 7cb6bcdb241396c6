use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use super::Scraper;
use crate::core::ScraperConfig;
use crate::http::ResponseType;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};

#[derive(Debug, Error)]
pub enum HttpScraperError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] header::InvalidHeaderName),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
    #[error("Failed to decode response body: {0}")]
    DecodingError(String),
}

impl From<HttpScraperError> for ScraperError {
    fn from(err: HttpScraperError) -> Self {
        match err {
            HttpScraperError::HttpError(e) => ScraperError::from(e),
            HttpScraperError::DecodingError(msg) => ScraperError::InvalidResponse(msg),
            other => ScraperError::InvalidHeader(other.to_string()),
        }
    }
}

/// Plain GET with browser-like headers. Sees the server-rendered markup only.
#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    config: ScraperConfig,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    pub fn new() -> Result<Self, HttpScraperError> {
        Self::with_config(ScraperConfig::default())
    }

    pub fn with_config(config: ScraperConfig) -> Result<Self, HttpScraperError> {
        let client = build_client(&config)?;
        Ok(Self {
            client,
            config,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Result<Self, HttpScraperError> {
        self.config = self.config.with_headers(headers);
        self.client = build_client(&self.config)?;
        Ok(self)
    }

    pub(crate) fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }

    pub(crate) async fn read_response(
        url: Url,
        response: reqwest::Response,
    ) -> Result<HttpResponse, HttpScraperError> {
        let start_time = Utc::now();
        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);

        let raw_body = response.bytes().await?;
        let decoded_body = String::from_utf8(raw_body.to_vec())
            .map_err(|e| HttpScraperError::DecodingError(e.to_string()))?;

        let meta = json!({
            "content_length": raw_body.len(),
            "encoding": headers.get("content-encoding").cloned().unwrap_or_default(),
        });
        let response_type = ResponseType::detect(&headers, &decoded_body);

        Ok(HttpResponse {
            url,
            status,
            headers,
            decoded_body,
            timestamp: start_time,
            meta: Some(meta),
            response_type,
        })
    }
}

fn build_client(config: &ScraperConfig) -> Result<Client, HttpScraperError> {
    let mut header_map = header::HeaderMap::new();
    for (key, value) in &config.headers {
        let name = header::HeaderName::from_bytes(key.as_bytes())?;
        let value = header::HeaderValue::from_str(value)?;
        header_map.insert(name, value);
    }
    if !header_map.contains_key(header::USER_AGENT) {
        header_map.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)?,
        );
    }

    Ok(ClientBuilder::new()
        .default_headers(header_map)
        .timeout(config.request_timeout)
        .build()?)
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(Self::read_response(url.clone(), response).await?)
    }

    fn name(&self) -> &'static str {
        "static"
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
