use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::http_scraper::{HttpScraper, HttpScraperError};
use super::Scraper;
use crate::core::RemoteApiConfig;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};

/// Delegates fetching (and, with `autoparse`, extraction) to a hosted
/// scraping API.
///
/// With `autoparse` off the API returns the rendered HTML and this type is an
/// ordinary `Scraper`. With `autoparse` on, call `fetch_parsed` and use the
/// service's own JSON record instead of the local extractor.
#[derive(Clone)]
pub struct RemoteApiScraper {
    client: Client,
    config: RemoteApiConfig,
    stats: Arc<StatsTracker>,
}

impl RemoteApiScraper {
    pub fn new(config: RemoteApiConfig) -> ScraperResult<Self> {
        Self::with_timeout(config, Duration::from_secs(120))
    }

    /// `new` uses a two minute timeout.
    pub fn with_timeout(config: RemoteApiConfig, timeout: Duration) -> ScraperResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ScraperError::Config(
                "remote API key is missing".to_string(),
            ));
        }
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(HttpScraperError::from)?;
        Ok(Self {
            client,
            config,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    pub fn config(&self) -> &RemoteApiConfig {
        &self.config
    }

    pub fn api_url(&self, target: &Url) -> ScraperResult<Url> {
        Ok(Url::parse_with_params(
            &self.config.endpoint,
            self.config.query_params(target.as_str()),
        )?)
    }

    /// Fetches the service's structured record for `target`.
    pub async fn fetch_parsed(&self, target: &Url) -> ScraperResult<Value> {
        if !self.config.autoparse {
            warn!("fetch_parsed called with autoparse disabled, the API will return HTML");
        }
        let response = self.fetch(target).await?;
        serde_json::from_str(&response.decoded_body).map_err(|e| {
            ScraperError::InvalidResponse(format!("expected JSON from remote API: {}", e))
        })
    }
}

#[async_trait]
impl Scraper for RemoteApiScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let api_url = self.api_url(url)?;
        debug!(
            "Calling remote API {} (js_render={}, premium_proxy={}, autoparse={})",
            self.config.endpoint,
            self.config.js_render,
            self.config.premium_proxy,
            self.config.autoparse
        );
        let response = self.client.get(api_url).send().await?;
        Ok(HttpScraper::read_response(url.clone(), response).await?)
    }

    fn name(&self) -> &'static str {
        "remote"
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
