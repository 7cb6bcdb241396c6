use crate::core::FailureKind;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use url::Url;

/// A page-fetching backend.
///
/// Backends implement `fetch_single`; callers use `fetch`, which adds
/// logging and stats and rejects non-success statuses. There is no retry:
/// one attempt either yields a page or an error.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse>;
    fn name(&self) -> &'static str;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    async fn fetch(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();
        info!("Fetching URL: {} (backend={})", url, self.name());

        let response = match self.fetch_single(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for URL: {} ({})", url, e);
                self.stats().record_failure(e.kind());
                return Err(e);
            }
        };
        debug!(
            "Received response: status={}, body_length={}",
            response.status,
            response.decoded_body.len()
        );

        let duration = Utc::now().signed_duration_since(start_time);
        self.stats()
            .record_request(response.status, response.decoded_body.len(), duration);

        if !response.is_success() {
            warn!("Non-success status {} for URL: {}", response.status, url);
            self.stats().record_failure(FailureKind::HttpStatus);
            return Err(ScraperError::HttpStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        info!(
            "Request completed for URL: {} (status={}, elapsed={}ms)",
            url,
            response.status,
            duration.num_milliseconds()
        );
        Ok(response)
    }
}
